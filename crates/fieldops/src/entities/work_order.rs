use chrono::{DateTime, NaiveDate, Utc};
use fieldops_seeker::{Number, Seekable, Timestamp, Value};
use serde::{Deserialize, Serialize};

use super::{nested, nested_path, ClientRef, Entity, EntityKind, TechnicianRef};

string_enum! {
    /// Progress of a work order.
    WorkOrderStatus {
        Pending => ("pending", "Pending"),
        Scheduled => ("scheduled", "Scheduled"),
        InProgress => ("in_progress", "In progress"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

string_enum! {
    /// Urgency of a work order.
    Priority {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
        Urgent => ("urgent", "Urgent"),
    }
}

impl Priority {
    /// Position in the urgency scale, for sorting by priority.
    pub fn rank(self) -> u32 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }
}

/// A scheduled job at a client site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub client: ClientRef,
    #[serde(default)]
    pub technician: Option<TechnicianRef>,
    pub status: WorkOrderStatus,
    pub priority: Priority,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Seekable for WorkOrder {
    fn field_value(&self, field: &str) -> Value<'_> {
        if let Some((head, rest)) = nested_path(field) {
            return match head {
                "client" => self.client.field_value(rest),
                "technician" => nested(self.technician.as_ref(), rest),
                _ => Value::None,
            };
        }
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "title" => Value::String(&self.title),
            "description" => self.description.as_deref().into(),
            "status" => Value::String(self.status.as_str()),
            "priority" => Value::String(self.priority.as_str()),
            "priority_rank" => Value::Number(Number::from(self.priority.rank())),
            "scheduled_date" => self.scheduled_date.map(Timestamp::from).into(),
            "created_at" => Timestamp::from(&self.created_at).into(),
            _ => Value::None,
        }
    }
}

impl Entity for WorkOrder {
    const KIND: EntityKind = EntityKind::WorkOrders;

    fn id(&self) -> i64 {
        self.id
    }
}
