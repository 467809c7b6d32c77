use crate::domain::model::{RegionId, RegionState};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the portal backend. One network attempt per call.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// `path` is relative to the backend's route prefix, e.g. `/products`.
    async fn fetch(&self, path: &str) -> Result<serde_json::Value>;
}

/// The host document's output regions. Every call replaces the region's
/// whole content.
pub trait Surface {
    fn set_region(&mut self, region: RegionId, state: RegionState);
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_prefix(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
    fn page_title(&self) -> &str;
}
