//! On-chain transaction descriptors.

use serde::{Deserialize, Serialize};

/// A transaction descriptor produced by full-mode evaluation.
///
/// The interpreter only builds these and returns them in source order;
/// signing and broadcast belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Target address.
    pub to: String,
    /// Calldata payload, `0x`-prefixed hex.
    pub data: String,
    /// Native value to attach, in wei.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i128>,
    /// Origin address override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl Action {
    pub fn new(to: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            data: data.into(),
            value: None,
            from: None,
        }
    }

    pub fn with_value(mut self, value: i128) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}
