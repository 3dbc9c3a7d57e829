use serde::Deserialize;

use crate::domain::proposal::DeliverySettings;

#[derive(Deserialize)]
/// Form data for the delivery channels on the final step.
pub struct DeliveryForm {
    #[serde(default)]
    pub by_email: bool,
    #[serde(default)]
    pub by_telegram: bool,
    #[serde(default)]
    pub email_message: String,
    #[serde(default)]
    pub telegram_message: String,
}

impl From<&DeliveryForm> for DeliverySettings {
    /// Message bodies are sanitized on the way in.
    fn from(form: &DeliveryForm) -> Self {
        let mut settings = DeliverySettings {
            by_email: form.by_email,
            by_telegram: form.by_telegram,
            ..DeliverySettings::default()
        };
        settings.set_email_message(&form.email_message);
        settings.set_telegram_message(&form.telegram_message);
        settings
    }
}
