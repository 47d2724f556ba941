// ============================================================
// ADDRESS TYPES
// ============================================================

use serde::{Deserialize, Serialize};

/// Kind of contact a source column carries, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Phone,
    Email,
}

impl AddressKind {
    /// Phone wins when a column name mentions both
    pub fn from_field_name(name: &str) -> Option<Self> {
        if name.contains("phone") {
            Some(AddressKind::Phone)
        } else if name.contains("email") {
            Some(AddressKind::Email)
        } else {
            None
        }
    }

    pub fn is_address_field(name: &str) -> bool {
        Self::from_field_name(name).is_some()
    }
}

/// A validated phone number or email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "type")]
    pub kind: String,

    pub tags: Vec<String>,

    pub address: String,
}

impl Address {
    /// `type` and `tags` come from the source column name: the first word
    /// is the type, the remaining words are tags
    pub fn from_field_name(field_name: &str, address: String) -> Self {
        let mut words = field_name.split_whitespace();
        let kind = words.next().unwrap_or_default().to_string();
        let tags = words.map(str::to_string).collect();

        Self {
            kind,
            tags,
            address,
        }
    }
}
