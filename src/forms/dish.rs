use serde::Deserialize;
use validator::Validate;

use crate::domain::dish::LocalDishId;
use crate::domain::ledger::LineItemLedger;
use crate::domain::units::{Portion, Unit};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for a user-authored dish row.
pub struct CustomDishForm {
    /// Local id of the row being edited (negative).
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Portion figure as typed, possibly a "150/75" dual.
    #[serde(default)]
    pub portion: String,
    /// Unit tag (г/кг/мл/л/шт).
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub category: String,
}

impl CustomDishForm {
    /// Validates the form and writes it into the matching custom row.
    pub fn apply_to(&self, ledger: &mut LineItemLedger) -> Result<(), FormError> {
        self.validate()?;
        if self.id >= 0 {
            return Err(FormError::UnknownDish);
        }
        let dish = ledger
            .custom_dish_mut(LocalDishId::new(self.id))
            .ok_or(FormError::UnknownDish)?;
        dish.name = self.name.trim().to_string();
        dish.description = self.description.trim().to_string();
        dish.portion = Portion::new(self.portion.as_str());
        dish.unit = Unit::parse(&self.unit);
        dish.price = self.price;
        dish.quantity = self.quantity;
        dish.category = self.category.trim().to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_the_custom_row() {
        let mut ledger = LineItemLedger::default();
        let local = ledger.add_custom_dish(10);
        let form = CustomDishForm {
            id: local.get(),
            name: " Фирменный торт ".to_string(),
            description: String::new(),
            portion: "1,2".to_string(),
            unit: "кг".to_string(),
            price: 3000.0,
            quantity: 1,
            category: String::new(),
        };
        form.apply_to(&mut ledger).unwrap();
        let dish = ledger.custom_dish_mut(local).unwrap();
        assert_eq!(dish.name, "Фирменный торт");
        assert_eq!(dish.portion.canonical(dish.unit), 1200.0);
    }

    #[test]
    fn unknown_row_is_rejected() {
        let mut ledger = LineItemLedger::default();
        let form = CustomDishForm {
            id: -9,
            name: "Торт".to_string(),
            description: String::new(),
            portion: String::new(),
            unit: String::new(),
            price: 0.0,
            quantity: 0,
            category: String::new(),
        };
        assert!(matches!(
            form.apply_to(&mut ledger),
            Err(FormError::UnknownDish)
        ));
    }
}
