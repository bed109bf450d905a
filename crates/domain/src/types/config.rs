//! Node configuration

use serde::{Deserialize, Serialize};

use super::credentials::PicnicCredentials;
use super::output::FailurePolicy;

/// Runtime configuration for a batch run
///
/// Loaded by infra from the environment or a JSON/TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub credentials: PicnicCredentials,
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Overrides the storefront URL derived from country and API version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl NodeConfig {
    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy { continue_on_fail: self.continue_on_fail }
    }
}
