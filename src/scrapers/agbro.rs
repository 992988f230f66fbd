use crate::config::Config;
use crate::scrapers::traits::RateSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Fetches the AgBro home page over plain HTTP
pub struct AgbroScraper {
    client: Client,
    url: String,
    source_tag: String,
}

impl AgbroScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.source_url.clone(),
            source_tag: config.source_tag.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for AgbroScraper {
    async fn fetch_page(&self) -> Result<String> {
        info!("Fetching rates page from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", self.url, status);
            anyhow::bail!("Failed to fetch {}: HTTP {}", self.url, status);
        }

        let html = response.text().await.context("Failed to read response body")?;

        debug!("Downloaded {} bytes of HTML", html.len());

        Ok(html)
    }

    fn source_name(&self) -> &str {
        &self.source_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_url_and_tag_from_config() {
        let config = Config {
            source_url: "http://localhost:9/".to_string(),
            source_tag: "test.local".to_string(),
            ..Config::default()
        };

        let scraper = AgbroScraper::new(&config).unwrap();
        assert_eq!(scraper.url(), "http://localhost:9/");
        assert_eq!(scraper.source_name(), "test.local");
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        let config = Config {
            // port 1 on loopback has nothing listening
            source_url: "http://127.0.0.1:1/".to_string(),
            ..Config::default()
        };

        let scraper = AgbroScraper::new(&config).unwrap();
        let err = scraper.fetch_page().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to fetch"));
    }
}
