//! Thin client for the Bunny control and storage APIs.
//!
//! Only three calls matter to this service: purge a pull zone, list the
//! perma-cache folders in a storage zone, delete one folder. They live
//! behind the `CdnApi` trait so the pipeline and its tests can swap in a
//! double without touching the network.

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::error::AppError;
use crate::config::RelayConfig;

/// Storage-zone directory Bunny repopulates with perma-cache folders.
pub const PERMA_CACHE_ROOT: &str = "__bcdn_perma_cache__";

const DEFAULT_API_BASE: &str = "https://api.bunny.net";

/// One perma-cache folder from the storage listing. The listing carries
/// more fields; only the name is needed to address the delete.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheFolderEntry {
    #[serde(rename = "ObjectName")]
    pub object_name: String,
}

#[async_trait]
pub trait CdnApi: Send + Sync {
    /// Purge the entire pull zone cache.
    async fn purge_cache(&self) -> Result<(), AppError>;

    /// List every folder under the perma-cache root.
    async fn list_perma_cache_folders(&self) -> Result<Vec<CacheFolderEntry>, AppError>;

    /// Delete one perma-cache folder by name.
    async fn delete_folder(&self, object_name: &str) -> Result<(), AppError>;
}

pub struct BunnyClient {
    http: reqwest::Client,
    api_base: String,
    storage_base: String,
    pull_zone_id: String,
    api_key: String,
    storage_password: String,
}

impl BunnyClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    /// Same as `new` but pointing the control API elsewhere (tests).
    pub fn with_api_base(config: &RelayConfig, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            storage_base: format!(
                "https://{}/{}",
                config.storage_host, config.storage_zone_name
            ),
            pull_zone_id: config.pull_zone_id.clone(),
            api_key: config.api_key.clone(),
            storage_password: config.storage_password.clone(),
        }
    }

    fn purge_url(&self) -> String {
        format!("{}/pullzone/{}/purgeCache", self.api_base, self.pull_zone_id)
    }

    fn listing_url(&self) -> String {
        format!("{}/{}/", self.storage_base, PERMA_CACHE_ROOT)
    }

    fn folder_url(&self, object_name: &str) -> String {
        format!("{}/{}/{}/", self.storage_base, PERMA_CACHE_ROOT, object_name)
    }
}

#[async_trait]
impl CdnApi for BunnyClient {
    async fn purge_cache(&self) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.purge_url())
            .header("AccessKey", &self.api_key)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PurgeFailed {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn list_perma_cache_folders(&self) -> Result<Vec<CacheFolderEntry>, AppError> {
        let response = self
            .http
            .get(self.listing_url())
            .header("AccessKey", &self.storage_password)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ListFailed {
                status: status.as_u16(),
            });
        }

        let entries = response
            .json::<Vec<CacheFolderEntry>>()
            .await
            .map_err(|e| anyhow::anyhow!("malformed perma-cache listing: {e}"))?;
        Ok(entries)
    }

    async fn delete_folder(&self, object_name: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.folder_url(object_name))
            .header("AccessKey", &self.storage_password)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DeleteFailed {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
