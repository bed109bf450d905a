//! Operation dispatcher - per-item flow
//!
//! Resolves credentials, consults the session cache, authenticates a client
//! handle, runs the requested operation and, when a cached session turns out
//! to be stale, logs in again and retries the operation once.

use std::sync::Arc;

use picnic_common::time::{Clock, SystemClock};
use picnic_domain::constants::AUTH_ERROR_MARKERS;
use picnic_domain::{
    FailurePolicy, NodeExecutionItem, OperationRequest, OperationResult, PicnicCredentials,
    PicnicError,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::call::OperationCall;
use crate::picnic_ports::{ClientFactory, ClientOptions, CredentialsProvider, PicnicClient};
use crate::session::{build_cache_key, ensure_authenticated, AuthCache, CacheKey};

/// Failure of one item, tagged with its position in the batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct NodeOperationError {
    pub item_index: usize,
    #[source]
    pub error: PicnicError,
}

impl NodeOperationError {
    pub fn new(item_index: usize, error: PicnicError) -> Self {
        Self { item_index, error }
    }
}

/// Whether `error` reads like a rejected or expired session
///
/// Plain substring match on the lower-cased message. Messages that merely
/// mention "auth" also match and cost one extra login.
pub fn is_likely_auth_error(error: &PicnicError) -> bool {
    let message = error.to_string().to_lowercase();
    AUTH_ERROR_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Runs batches of operation requests against the remote service
///
/// Items are processed strictly in order; each item, including its retry,
/// completes before the next one starts.
pub struct OperationDispatcher<C: Clock = SystemClock> {
    client_factory: Arc<dyn ClientFactory>,
    credentials: Arc<dyn CredentialsProvider>,
    auth_cache: Arc<AuthCache<C>>,
}

impl<C: Clock> OperationDispatcher<C> {
    pub fn new(
        client_factory: Arc<dyn ClientFactory>,
        credentials: Arc<dyn CredentialsProvider>,
        auth_cache: Arc<AuthCache<C>>,
    ) -> Self {
        Self { client_factory, credentials, auth_cache }
    }

    pub fn auth_cache(&self) -> &Arc<AuthCache<C>> {
        &self.auth_cache
    }

    /// Execute a batch
    ///
    /// Item indices are positions in `requests`. With
    /// [`FailurePolicy::CONTINUE`] a failed item becomes an `{error}` record
    /// and processing moves on; otherwise the first failure aborts the batch
    /// and results gathered so far are discarded.
    #[instrument(skip_all, fields(run_id = %Uuid::new_v4(), items = requests.len()))]
    pub async fn execute(
        &self,
        requests: &[OperationRequest],
        policy: FailurePolicy,
    ) -> Result<Vec<NodeExecutionItem>, NodeOperationError> {
        let mut output = Vec::with_capacity(requests.len());

        for (item_index, request) in requests.iter().enumerate() {
            match self.process_item(item_index, request).await {
                Ok(result) => output.push(NodeExecutionItem::success(item_index, result)),
                Err(error) if policy.continue_on_fail => {
                    warn!(item_index, kind = error.label(), error = %error, "item_failed_continuing");
                    output.push(NodeExecutionItem::failure(item_index, error.to_string()));
                }
                Err(error) => {
                    warn!(item_index, kind = error.label(), error = %error, "item_failed_aborting_batch");
                    return Err(NodeOperationError::new(item_index, error));
                }
            }
        }

        info!(items = output.len(), "batch_completed");
        Ok(output)
    }

    /// Execute a single request, using its own `item_index`.
    pub async fn execute_item(
        &self,
        request: &OperationRequest,
    ) -> Result<OperationResult, NodeOperationError> {
        self.process_item(request.item_index, request)
            .await
            .map_err(|error| NodeOperationError::new(request.item_index, error))
    }

    async fn process_item(
        &self,
        item_index: usize,
        request: &OperationRequest,
    ) -> Result<OperationResult, PicnicError> {
        let call = OperationCall::from_request(request)?;
        let operation = call.operation();
        debug!(item_index, operation = operation.label(), "processing_item");

        let credentials = self.credentials.credentials(item_index).await?;
        let configured_key = credentials.configured_auth_key();
        let user_id = credentials.user_id();
        let password = credentials.password();

        let cache_key = configured_key.is_none().then(|| {
            build_cache_key(user_id, credentials.country_code.as_str(), credentials.api_version())
        });
        let initial_key = match configured_key {
            Some(key) => Some(key.to_string()),
            None => cache_key.as_ref().and_then(|key| self.auth_cache.get(key)),
        };

        let mut client = self
            .client_factory
            .create(&ClientOptions::from_credentials(&credentials, initial_key.clone()))?;
        self.authenticate(
            client.as_mut(),
            initial_key.as_deref().unwrap_or_default(),
            &credentials,
            cache_key.as_ref(),
        )
        .await?;

        let result = match call.dispatch(client.as_ref()).await {
            Ok(result) => result,
            Err(error) => match cache_key.as_ref() {
                Some(key) if is_likely_auth_error(&error) && credentials.has_login_pair() => {
                    warn!(item_index, error = %error, "session_rejected_retrying_with_fresh_login");
                    self.auth_cache.clear(key);

                    let mut retry_client = self
                        .client_factory
                        .create(&ClientOptions::from_credentials(&credentials, None))?;
                    self.authenticate(retry_client.as_mut(), "", &credentials, Some(key)).await?;

                    call.dispatch(retry_client.as_ref()).await?
                }
                _ => return Err(error),
            },
        };

        Ok(OperationResult { operation: operation.label().to_string(), result })
    }

    /// Authenticate `client` and cache the token it ends up holding.
    async fn authenticate(
        &self,
        client: &mut dyn PicnicClient,
        auth_key: &str,
        credentials: &PicnicCredentials,
        cache_key: Option<&CacheKey>,
    ) -> Result<(), PicnicError> {
        ensure_authenticated(&mut *client, auth_key, credentials.user_id(), credentials.password())
            .await
            .map_err(as_authentication_failure)?;

        if let Some(key) = cache_key {
            let token = client.auth_key();
            match token.as_deref().map(str::trim).filter(|token| !token.is_empty()) {
                Some(token) => self.auth_cache.set(key, token),
                None => debug!("client_holds_no_session_token"),
            }
        }

        Ok(())
    }
}

fn as_authentication_failure(error: PicnicError) -> PicnicError {
    match error {
        PicnicError::CredentialsMissing | PicnicError::Authentication(_) => error,
        other => PicnicError::Authentication(other.to_string()),
    }
}
