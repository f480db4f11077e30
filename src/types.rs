use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys every projection carries; account fields may not reuse them.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["signature", "slot"];

/// A named account slot of an instruction, e.g. `mint` at position 0.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountField {
    pub name: String,
    pub position: usize,
}

impl AccountField {
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Output record for one matching transaction.
///
/// Serializes flat: `{"signature": .., "slot": .., "mint": .., ...}`. A field
/// whose account could not be resolved is simply absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedProjection {
    pub signature: String,
    pub slot: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl DecodedProjection {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
