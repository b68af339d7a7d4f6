use crate::domain::model::{CalculatorSettings, Dataset, Rankings};
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

/// Where the inputs live, where the outputs go, and the settings to compute with.
pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn crops_file(&self) -> &str;
    fn fruits_file(&self) -> &str;
    /// Local path (relative to `data_dir`) or an http(s) URL.
    fn prices_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn output_filename(&self, format: &str) -> String {
        format!("profit_report.{}", format)
    }
    /// ZIP archive name when outputs should be bundled.
    fn compression(&self) -> Option<&str> {
        None
    }
    fn settings(&self) -> CalculatorSettings;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<Rankings>;
    async fn load(&self, rankings: &Rankings) -> Result<String>;
}
