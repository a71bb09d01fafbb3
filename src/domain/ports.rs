use crate::domain::model::{PlannedFile, RenderedFile, WriteReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// Names of the directories directly under `path`.
    fn list_dirs(&self, path: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn workspace_root(&self) -> &str;
    fn book(&self) -> &str;
    fn variant_names(&self) -> &[String];
    fn notes_file(&self) -> &str;
    fn force(&self) -> bool;
}

#[async_trait]
pub trait Scaffold: Send + Sync {
    async fn plan(&self) -> Result<Vec<PlannedFile>>;
    async fn render(&self, plan: Vec<PlannedFile>) -> Result<Vec<RenderedFile>>;
    async fn write(&self, files: Vec<RenderedFile>) -> Result<WriteReport>;
}
