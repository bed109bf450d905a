//! Validated operation calls
//!
//! Turns a raw [`OperationRequest`] into a typed call before any remote
//! traffic happens, so malformed items fail without a login.

use picnic_domain::{Operation, OperationRequest, ParamValue, PicnicError, Result};
use serde_json::{json, Value};

use super::methods::{call_method, candidate_methods};
use crate::picnic_ports::PicnicClient;

const DEFAULT_COUNT: u32 = 1;

/// One operation with its validated parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationCall {
    SearchProducts { query: String },
    GetCart,
    AddToCart { product_id: String, count: u32 },
    ClearCart,
    GetDeliveries,
    GetUserDetails,
}

impl OperationCall {
    /// Parse the operation name and its parameters
    ///
    /// # Errors
    ///
    /// - [`PicnicError::UnsupportedOperation`] for unknown operation names
    /// - [`PicnicError::InvalidParameter`] for missing or malformed parameters
    pub fn from_request(request: &OperationRequest) -> Result<Self> {
        let operation: Operation = request.operation.parse()?;

        Ok(match operation {
            Operation::SearchProducts => {
                Self::SearchProducts { query: required_text(request, "query")? }
            }
            Operation::GetCart => Self::GetCart,
            Operation::AddToCart => Self::AddToCart {
                product_id: required_text(request, "productId")?,
                count: count(request)?,
            },
            Operation::ClearCart => Self::ClearCart,
            Operation::GetDeliveries => Self::GetDeliveries,
            Operation::GetUserDetails => Self::GetUserDetails,
        })
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::SearchProducts { .. } => Operation::SearchProducts,
            Self::GetCart => Operation::GetCart,
            Self::AddToCart { .. } => Operation::AddToCart,
            Self::ClearCart => Operation::ClearCart,
            Self::GetDeliveries => Operation::GetDeliveries,
            Self::GetUserDetails => Operation::GetUserDetails,
        }
    }

    /// Positional arguments for the remote method.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::SearchProducts { query } => vec![json!(query)],
            Self::AddToCart { product_id, count } => vec![json!(product_id), json!(count)],
            Self::GetCart | Self::ClearCart | Self::GetDeliveries | Self::GetUserDetails => {
                Vec::new()
            }
        }
    }

    /// Run this call against `client` through the method resolver.
    pub async fn dispatch<C>(&self, client: &C) -> Result<Value>
    where
        C: PicnicClient + ?Sized,
    {
        let operation = self.operation();
        call_method(client, operation.label(), candidate_methods(operation), &self.args()).await
    }
}

fn required_text(request: &OperationRequest, name: &str) -> Result<String> {
    let text = match request.param(name) {
        Some(ParamValue::String(value)) => value.trim().to_string(),
        Some(ParamValue::Number(value)) => format_number(*value),
        None => String::new(),
    };

    if text.is_empty() {
        return Err(PicnicError::invalid_parameter(name, "is required"));
    }
    Ok(text)
}

fn count(request: &OperationRequest) -> Result<u32> {
    let invalid = || PicnicError::invalid_parameter("count", "must be a whole number of at least 1");

    let count = match request.param("count") {
        None => return Ok(DEFAULT_COUNT),
        Some(ParamValue::Number(value)) => {
            if value.fract() != 0.0 || *value < 1.0 || *value > f64::from(u32::MAX) {
                return Err(invalid());
            }
            // Range and integrality checked above.
            *value as u32
        }
        Some(ParamValue::String(value)) => value.trim().parse::<u32>().map_err(|_| invalid())?,
    };

    if count < 1 {
        return Err(invalid());
    }
    Ok(count)
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_query() {
        let request = OperationRequest::new(0, "searchProducts").with_param("query", " milk ");

        let call = OperationCall::from_request(&request).unwrap();

        assert_eq!(call, OperationCall::SearchProducts { query: "milk".into() });
        assert_eq!(call.args(), vec![json!("milk")]);
    }

    #[test]
    fn search_requires_a_query() {
        for request in [
            OperationRequest::new(0, "search-products"),
            OperationRequest::new(0, "search-products").with_param("query", "   "),
        ] {
            let err = OperationCall::from_request(&request).unwrap_err();
            assert_eq!(err, PicnicError::invalid_parameter("query", "is required"));
        }
    }

    #[test]
    fn add_to_cart_defaults_count_to_one() {
        let request = OperationRequest::new(0, "add-to-cart").with_param("productId", "s100");

        let call = OperationCall::from_request(&request).unwrap();

        assert_eq!(call, OperationCall::AddToCart { product_id: "s100".into(), count: 1 });
        assert_eq!(call.operation().label(), "addToCart");
    }

    #[test]
    fn add_to_cart_accepts_numeric_product_id_and_string_count() {
        let request = OperationRequest::new(0, "addToCart")
            .with_param("productId", 123_u32)
            .with_param("count", "3");

        let call = OperationCall::from_request(&request).unwrap();

        assert_eq!(call.args(), vec![json!("123"), json!(3)]);
    }

    #[test]
    fn add_to_cart_rejects_invalid_counts() {
        for count in [ParamValue::Number(0.0), ParamValue::Number(1.5), ParamValue::Number(-2.0), "two".into()]
        {
            let request = OperationRequest::new(0, "addToCart")
                .with_param("productId", "123")
                .with_param("count", count.clone());

            let err = OperationCall::from_request(&request).unwrap_err();
            assert!(matches!(err, PicnicError::InvalidParameter { ref name, .. } if name == "count"), "{count:?}");
        }
    }

    #[test]
    fn parameterless_operations_have_no_args() {
        for name in ["getCart", "clear-cart", "getDeliveries", "get-user-details"] {
            let call = OperationCall::from_request(&OperationRequest::new(0, name)).unwrap();
            assert!(call.args().is_empty(), "{name}");
        }
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = OperationCall::from_request(&OperationRequest::new(0, "checkout")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported operation: checkout");
    }
}
