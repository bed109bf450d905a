//! Records returned to the host

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful result of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub operation: String,
    pub result: Value,
}

/// Per-item outcome as seen by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemOutcome {
    Success(OperationResult),
    Failure { error: String },
}

/// Index of the input item an output record originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// Output record tagged with its originating item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionItem {
    pub json: ItemOutcome,
    pub paired_item: PairedItem,
}

impl NodeExecutionItem {
    pub fn success(item_index: usize, result: OperationResult) -> Self {
        Self { json: ItemOutcome::Success(result), paired_item: PairedItem { item: item_index } }
    }

    pub fn failure(item_index: usize, error: impl Into<String>) -> Self {
        Self {
            json: ItemOutcome::Failure { error: error.into() },
            paired_item: PairedItem { item: item_index },
        }
    }

    pub fn item_index(&self) -> usize {
        self.paired_item.item
    }

    pub fn is_success(&self) -> bool {
        matches!(self.json, ItemOutcome::Success(_))
    }
}

/// Per-batch error policy chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePolicy {
    pub continue_on_fail: bool,
}

impl FailurePolicy {
    pub const ABORT: Self = Self { continue_on_fail: false };
    pub const CONTINUE: Self = Self { continue_on_fail: true };
}
