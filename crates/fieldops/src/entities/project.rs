use chrono::NaiveDate;
use fieldops_seeker::{Number, Seekable, Timestamp, Value};
use serde::{Deserialize, Serialize};

use super::{nested_path, ClientRef, Entity, EntityKind};

string_enum! {
    /// Lifecycle stage of a project.
    ProjectStatus {
        Planning => ("planning", "Planning"),
        Active => ("active", "Active"),
        OnHold => ("on_hold", "On hold"),
        Completed => ("completed", "Completed"),
    }
}

/// A multi-visit engagement for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client: ClientRef,
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Seekable for Project {
    fn field_value(&self, field: &str) -> Value<'_> {
        if let Some((head, rest)) = nested_path(field) {
            return match head {
                "client" => self.client.field_value(rest),
                _ => Value::None,
            };
        }
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            "status" => Value::String(self.status.as_str()),
            "budget" => self.budget.map(Number::F64).into(),
            "start_date" => self.start_date.map(Timestamp::from).into(),
            "end_date" => self.end_date.map(Timestamp::from).into(),
            _ => Value::None,
        }
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Projects;

    fn id(&self) -> i64 {
        self.id
    }
}
