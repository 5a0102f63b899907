use chrono::{DateTime, Utc};
use fieldops_seeker::{Number, Seekable, Timestamp, Value};
use serde::{Deserialize, Serialize};

use super::{nested, nested_path, Address, ClientRef, Entity, EntityKind};

string_enum! {
    /// Account status of a client.
    ClientStatus {
        Active => ("active", "Active"),
        Inactive => ("inactive", "Inactive"),
        Prospect => ("prospect", "Prospect"),
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub status: ClientStatus,
    #[serde(default)]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl Seekable for Client {
    fn field_value(&self, field: &str) -> Value<'_> {
        if let Some((head, rest)) = nested_path(field) {
            return match head {
                "address" => nested(self.address.as_ref(), rest),
                _ => Value::None,
            };
        }
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            "email" => self.email.as_deref().into(),
            "phone" => self.phone.as_deref().into(),
            "industry" => self.industry.as_deref().into(),
            "status" => Value::String(self.status.as_str()),
            "created_at" => Timestamp::from(&self.created_at).into(),
            _ => Value::None,
        }
    }
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Clients;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A service site belonging to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientLocation {
    pub id: i64,
    pub client: ClientRef,
    pub name: String,
    pub address: Address,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl Seekable for ClientLocation {
    fn field_value(&self, field: &str) -> Value<'_> {
        if let Some((head, rest)) = nested_path(field) {
            return match head {
                "client" => self.client.field_value(rest),
                "address" => self.address.field_value(rest),
                _ => Value::None,
            };
        }
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            "is_primary" => Value::Bool(self.is_primary),
            "contact_name" => self.contact_name.as_deref().into(),
            "contact_phone" => self.contact_phone.as_deref().into(),
            _ => Value::None,
        }
    }
}

impl Entity for ClientLocation {
    const KIND: EntityKind = EntityKind::Locations;

    fn id(&self) -> i64 {
        self.id
    }
}
