//! Operation requests supplied by the host

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PicnicError;

/// Logical operation exposed to the workflow author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchProducts,
    GetCart,
    AddToCart,
    ClearCart,
    GetDeliveries,
    GetUserDetails,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::SearchProducts,
        Self::GetCart,
        Self::AddToCart,
        Self::ClearCart,
        Self::GetDeliveries,
        Self::GetUserDetails,
    ];

    /// Host-facing value, also used as the result label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SearchProducts => "searchProducts",
            Self::GetCart => "getCart",
            Self::AddToCart => "addToCart",
            Self::ClearCart => "clearCart",
            Self::GetDeliveries => "getDeliveries",
            Self::GetUserDetails => "getUserDetails",
        }
    }

    /// Kebab-case alias accepted alongside the label.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::SearchProducts => "search-products",
            Self::GetCart => "get-cart",
            Self::AddToCart => "add-to-cart",
            Self::ClearCart => "clear-cart",
            Self::GetDeliveries => "get-deliveries",
            Self::GetUserDetails => "get-user-details",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = PicnicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.label() == s || op.slug() == s)
            .ok_or_else(|| PicnicError::UnsupportedOperation(format!("Unsupported operation: {s}")))
    }
}

/// Parameter value as typed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Number(f64),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// One input item: which operation to run and with which parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    #[serde(default)]
    pub item_index: usize,
    pub operation: String,
    #[serde(default)]
    pub parameters: HashMap<String, ParamValue>,
}

impl OperationRequest {
    pub fn new(item_index: usize, operation: impl Into<String>) -> Self {
        Self { item_index, operation: operation.into(), parameters: HashMap::new() }
    }

    /// Builder-style parameter insertion.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }
}
