//! Output document templates served by the template registry.

use serde::{Deserialize, Serialize};

use crate::domain::types::TemplateId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Picks the template a fresh draft starts with.
pub fn default_template(templates: &[Template]) -> Option<&Template> {
    templates
        .iter()
        .find(|template| template.is_default)
        .or_else(|| templates.first())
}
