use serde::{Deserialize, Serialize};

use crate::model::PartnerId;

/// A funding organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Partner as embedded in a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRef {
    pub id: PartnerId,
    pub name: String,
}

impl From<&Partner> for PartnerRef {
    fn from(partner: &Partner) -> Self {
        Self {
            id: partner.id.clone(),
            name: partner.name.clone(),
        }
    }
}
