use anyhow::Result;
use async_trait::async_trait;

/// Anything that can hand back the raw markup of the rates page.
/// The runner only talks to this, so tests can stand in their own page.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the page body
    async fn fetch_page(&self) -> Result<String>;

    /// Identifier written into the envelope
    fn source_name(&self) -> &str;
}
