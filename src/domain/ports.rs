use crate::domain::model::Lead;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn backend_url(&self) -> &str;
    fn bind_address(&self) -> &str;
    fn port(&self) -> u16;
    fn secure_cookies(&self) -> bool;
    fn cookie_max_age_seconds(&self) -> i64;
    fn request_timeout_seconds(&self) -> u64;
    fn companies_per_page(&self) -> usize;
    fn default_page_size(&self) -> usize;
}

/// Produces the unique suffix of a lead identifier.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[async_trait]
pub trait ImportPipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, content: String) -> Result<Vec<Lead>>;
    async fn load(&self, leads: Vec<Lead>) -> Result<String>;
}
