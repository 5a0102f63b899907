//! Dashboard entities.
//!
//! Every entity is a plain serde struct shaped like the rows the backing
//! store returns, and implements [`Seekable`] so its list page can run the
//! shared pipeline over it. Related records are embedded as [`EntityRef`]s
//! so nested sort keys such as `client.name` resolve without a join.

use std::fmt;
use std::str::FromStr;

use fieldops_seeker::{split_path, Number, Seekable, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Declares a string-valued status enum with facet labels.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Display name for filter menus.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// `(value, label)` pairs in declaration order.
            pub fn options() -> impl Iterator<Item = (&'static str, &'static str)> {
                Self::ALL.iter().map(|v| (v.as_str(), v.label()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod client;
mod material;
mod project;
mod quote;
mod technician;
mod work_order;

pub use client::{Client, ClientLocation, ClientStatus};
pub use material::Material;
pub use project::{Project, ProjectStatus};
pub use quote::{Quote, QuoteStatus};
pub use technician::{Technician, TechnicianStatus};
pub use work_order::{Priority, WorkOrder, WorkOrderStatus};

/// The list pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Clients,
    Locations,
    Technicians,
    Materials,
    WorkOrders,
    Quotes,
    Projects,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Clients,
        EntityKind::Locations,
        EntityKind::Technicians,
        EntityKind::Materials,
        EntityKind::WorkOrders,
        EntityKind::Quotes,
        EntityKind::Projects,
    ];

    /// Collection name in the backing store.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Locations => "client_locations",
            EntityKind::Technicians => "technicians",
            EntityKind::Materials => "materials",
            EntityKind::WorkOrders => "work_orders",
            EntityKind::Quotes => "quotes",
            EntityKind::Projects => "projects",
        }
    }

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Locations => "locations",
            EntityKind::Technicians => "technicians",
            EntityKind::Materials => "materials",
            EntityKind::WorkOrders => "work-orders",
            EntityKind::Quotes => "quotes",
            EntityKind::Projects => "projects",
        }
    }

    /// Singular noun for messages.
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Clients => "client",
            EntityKind::Locations => "location",
            EntityKind::Technicians => "technician",
            EntityKind::Materials => "material",
            EntityKind::WorkOrders => "work order",
            EntityKind::Quotes => "quote",
            EntityKind::Projects => "project",
        }
    }

    /// Comma-separated command-line names.
    pub fn names() -> String {
        EntityKind::ALL.map(EntityKind::name).join(", ")
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    /// Accepts the command-line name, the collection name, or the singular.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                needle == kind.name()
                    || needle == kind.collection().replace('_', "-")
                    || needle == kind.singular().replace(' ', "-")
            })
            .ok_or_else(|| Error::UnknownEntity(s.to_string()))
    }
}

/// A record that has its own list page.
pub trait Entity: Seekable + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> i64;
}

/// A related record embedded by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

pub type ClientRef = EntityRef;
pub type TechnicianRef = EntityRef;

impl EntityRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        EntityRef {
            id,
            name: name.into(),
        }
    }
}

impl Seekable for EntityRef {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            _ => Value::None,
        }
    }
}

/// A street address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl Seekable for Address {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "street" => self.street.as_deref().into(),
            "city" => self.city.as_deref().into(),
            "state" => self.state.as_deref().into(),
            "postal_code" => self.postal_code.as_deref().into(),
            _ => Value::None,
        }
    }
}

/// Resolves the rest of a dot path inside an optional embedded record.
pub(crate) fn nested<'a, T: Seekable>(inner: Option<&'a T>, rest: &str) -> Value<'a> {
    inner.map_or(Value::None, |inner| inner.field_value(rest))
}

/// Splits off a nested path, returning the head and rest only when the
/// path has more than one segment.
pub(crate) fn nested_path(field: &str) -> Option<(&str, &str)> {
    match split_path(field) {
        (head, Some(rest)) => Some((head, rest)),
        (_, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_parses_many_spellings() {
        for input in ["work-orders", "work_orders", "Work Order", "work-order"] {
            assert_eq!(input.parse::<EntityKind>().unwrap(), EntityKind::WorkOrders);
        }
        assert_eq!("client_locations".parse::<EntityKind>().unwrap(), EntityKind::Locations);
        assert_eq!("quote".parse::<EntityKind>().unwrap(), EntityKind::Quotes);
    }

    #[test]
    fn unknown_entity_lists_choices() {
        let err = "invoices".parse::<EntityKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown entity 'invoices' (available: clients, locations, technicians, materials, work-orders, quotes, projects)"
        );
    }

    #[test]
    fn entity_ref_resolves_fields() {
        let client = ClientRef::new(7, "Acme Plumbing");
        assert_eq!(client.field_value("name"), Value::String("Acme Plumbing"));
        assert_eq!(client.field_value("id"), Value::Number(Number::I64(7)));
        assert!(client.field_value("email").is_none());
    }
}
