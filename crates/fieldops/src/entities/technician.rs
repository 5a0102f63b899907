use chrono::NaiveDate;
use fieldops_seeker::{Number, Seekable, Timestamp, Value};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

string_enum! {
    /// Availability of a technician.
    TechnicianStatus {
        Active => ("active", "Active"),
        OnLeave => ("on_leave", "On leave"),
        Inactive => ("inactive", "Inactive"),
    }
}

/// A field technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    pub status: TechnicianStatus,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
}

impl Seekable for Technician {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            "email" => self.email.as_deref().into(),
            "phone" => self.phone.as_deref().into(),
            "specialty" => self.specialty.as_deref().into(),
            "status" => Value::String(self.status.as_str()),
            "hourly_rate" => self.hourly_rate.map(Number::F64).into(),
            "hired_on" => self.hired_on.map(Timestamp::from).into(),
            _ => Value::None,
        }
    }
}

impl Entity for Technician {
    const KIND: EntityKind = EntityKind::Technicians;

    fn id(&self) -> i64 {
        self.id
    }
}
