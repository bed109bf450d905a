//! Batch runner
//!
//! A batch is a JSON array of `{ "operation": ..., "parameters": { ... } }`
//! items. The output is the array of host records produced by the dispatcher.

use std::time::Instant;

use picnic_core::NodeOperationError;
use picnic_domain::OperationRequest;
use thiserror::Error;

use crate::context::AppContext;
use crate::utils::logging::log_batch_summary;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid batch input: {0}")]
    InvalidInput(String),

    #[error("Item {} failed: {}", .0.item_index, .0)]
    Aborted(#[from] NodeOperationError),

    #[error("Failed to encode batch output: {0}")]
    Output(String),
}

/// Parse a batch, numbering items by position.
pub fn parse_batch(input: &str) -> Result<Vec<OperationRequest>, RunError> {
    let mut requests: Vec<OperationRequest> =
        serde_json::from_str(input).map_err(|err| RunError::InvalidInput(err.to_string()))?;

    for (index, request) in requests.iter_mut().enumerate() {
        request.item_index = index;
    }
    Ok(requests)
}

/// Execute the batch in `input` and return the output records as JSON.
pub async fn run_batch(context: &AppContext, input: &str) -> Result<String, RunError> {
    let requests = parse_batch(input)?;
    let started = Instant::now();

    let output =
        context.dispatcher.execute(&requests, context.config.failure_policy()).await?;
    log_batch_summary(&output, started.elapsed());

    serde_json::to_string_pretty(&output).map_err(|err| RunError::Output(err.to_string()))
}
