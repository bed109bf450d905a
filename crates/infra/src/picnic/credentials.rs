//! Credential sources

use async_trait::async_trait;
use picnic_core::CredentialsProvider;
use picnic_domain::{PicnicCredentials, Result};

/// Supplies the same credentials record for every item of a batch.
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    credentials: PicnicCredentials,
}

impl StaticCredentialsProvider {
    pub fn new(credentials: PicnicCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn credentials(&self, _item_index: usize) -> Result<PicnicCredentials> {
        Ok(self.credentials.clone())
    }
}
