use fieldops_seeker::{Number, Seekable, Value};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    pub unit: String,
    pub unit_cost: f64,
    pub quantity_in_stock: i64,
    #[serde(default)]
    pub reorder_level: i64,
}

impl Material {
    /// Stock at or below the reorder level.
    pub fn low_stock(&self) -> bool {
        self.quantity_in_stock <= self.reorder_level
    }

    /// Value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.quantity_in_stock as f64 * self.unit_cost
    }
}

impl Seekable for Material {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            "sku" => self.sku.as_deref().into(),
            "category" => self.category.as_deref().into(),
            "supplier" => self.supplier.as_deref().into(),
            "unit" => Value::String(&self.unit),
            "unit_cost" => Value::Number(Number::F64(self.unit_cost)),
            "quantity_in_stock" => Value::Number(Number::I64(self.quantity_in_stock)),
            "reorder_level" => Value::Number(Number::I64(self.reorder_level)),
            "low_stock" => Value::Bool(self.low_stock()),
            "stock_value" => Value::Number(Number::F64(self.stock_value())),
            _ => Value::None,
        }
    }
}

impl Entity for Material {
    const KIND: EntityKind = EntityKind::Materials;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(quantity_in_stock: i64) -> Material {
        Material {
            id: 1,
            name: "Copper pipe 15mm".into(),
            sku: Some("CP-15".into()),
            category: Some("plumbing".into()),
            supplier: None,
            unit: "m".into(),
            unit_cost: 4.5,
            quantity_in_stock,
            reorder_level: 20,
        }
    }

    #[test]
    fn low_stock_is_derived() {
        assert_eq!(pipe(20).field_value("low_stock"), Value::Bool(true));
        assert_eq!(pipe(21).field_value("low_stock"), Value::Bool(false));
        assert_eq!(pipe(10).stock_value(), 45.0);
    }
}
