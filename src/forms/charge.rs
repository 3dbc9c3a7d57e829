use serde::Deserialize;
use validator::Validate;

use crate::domain::charge::ChargeItem;
use crate::domain::types::SubcategoryId;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for one equipment or service row.
pub struct ChargeItemForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
    /// Equipment subcategory reference, equipment rows only.
    #[serde(default)]
    pub subcategory: Option<i32>,
}

impl TryFrom<&ChargeItemForm> for ChargeItem {
    type Error = FormError;

    fn try_from(form: &ChargeItemForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let subcategory = match form.subcategory {
            Some(raw) => {
                Some(SubcategoryId::new(raw).map_err(|_| FormError::InvalidSubcategory)?)
            }
            None => None,
        };
        Ok(ChargeItem {
            name: form.name.trim().to_string(),
            quantity: form.quantity,
            price: form.price,
            subcategory,
        })
    }
}
