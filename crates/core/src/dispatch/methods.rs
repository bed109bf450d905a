//! Remote method resolution across client interface versions
//!
//! Each logical operation maps to an ordered list of remote method names,
//! newest interface first. The first name the connected handle supports is
//! invoked; older client versions are reached through the legacy names.

use picnic_domain::constants::UNSUPPORTED_CLIENT_PREFIX;
use picnic_domain::{Operation, PicnicError, Result};
use serde_json::Value;
use tracing::debug;

use crate::picnic_ports::{PicnicClient, RemoteMethod};

const SEARCH: &[RemoteMethod] = &[RemoteMethod::Search];
const CART: &[RemoteMethod] = &[RemoteMethod::GetShoppingCart, RemoteMethod::GetCart];
const ADD_TO_CART: &[RemoteMethod] = &[RemoteMethod::AddProductToShoppingCart];
const CLEAR_CART: &[RemoteMethod] = &[RemoteMethod::ClearShoppingCart, RemoteMethod::ClearCart];
const DELIVERIES: &[RemoteMethod] = &[RemoteMethod::GetDeliveries];
const USER_DETAILS: &[RemoteMethod] = &[RemoteMethod::GetUserDetails];

/// Candidate remote methods for `operation`, newest first
pub fn candidate_methods(operation: Operation) -> &'static [RemoteMethod] {
    match operation {
        Operation::SearchProducts => SEARCH,
        Operation::GetCart => CART,
        Operation::AddToCart => ADD_TO_CART,
        Operation::ClearCart => CLEAR_CART,
        Operation::GetDeliveries => DELIVERIES,
        Operation::GetUserDetails => USER_DETAILS,
    }
}

/// Invoke the first of `candidates` supported by `client`
///
/// # Errors
///
/// Returns [`PicnicError::UnsupportedOperation`] listing the tried and the
/// available method names when no candidate is supported. Errors from the
/// invoked method are returned unchanged.
pub async fn call_method<C>(
    client: &C,
    operation_label: &str,
    candidates: &[RemoteMethod],
    args: &[Value],
) -> Result<Value>
where
    C: PicnicClient + ?Sized,
{
    match candidates.iter().copied().find(|method| client.supports(*method)) {
        Some(method) => {
            debug!(operation = operation_label, method = method.as_str(), "remote_method_resolved");
            client.invoke(method, args).await
        }
        None => Err(unsupported_client(client, operation_label, candidates)),
    }
}

fn unsupported_client<C>(client: &C, operation_label: &str, candidates: &[RemoteMethod]) -> PicnicError
where
    C: PicnicClient + ?Sized,
{
    let tried = candidates.iter().map(RemoteMethod::as_str).collect::<Vec<_>>().join(", ");
    let available = client.available_methods();
    let available =
        if available.is_empty() { "(none)".to_string() } else { available.join(", ") };

    PicnicError::UnsupportedOperation(format!(
        "{UNSUPPORTED_CLIENT_PREFIX} \"{operation_label}\". Tried methods: {tried}. Available methods: {available}."
    ))
}
