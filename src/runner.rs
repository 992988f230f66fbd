use crate::config::Config;
use crate::models::RatesEnvelope;
use crate::output::write_envelope;
use crate::scrapers::{AgbroScraper, CardExtractor, RateSource};
use anyhow::Result;
use chrono::Local;
use scraper::Html;
use tracing::{debug, error, info};

/// Fetch, parse and extract. Any failure here becomes an error envelope.
pub async fn collect<S>(source: &S, extractor: &CardExtractor) -> RatesEnvelope
where
    S: RateSource + ?Sized,
{
    debug!("Fetching page from {}", source.source_name());
    let html = match source.fetch_page().await {
        Ok(html) => html,
        Err(err) => {
            error!("Scrape failed: {:#}", err);
            return RatesEnvelope::error(format!("{:#}", err));
        }
    };

    debug!("Parsing {} bytes of markup", html.len());
    let document = Html::parse_document(&html);

    let data = extractor.extract_all(&document);
    RatesEnvelope::success(data, source.source_name(), Local::now())
}

/// One full run: build the envelope and write it to `config.output_path`.
/// Only a failed write is returned as an error.
pub async fn run(config: &Config) -> Result<RatesEnvelope> {
    let envelope = match prepare(config) {
        Ok((scraper, extractor)) => collect(&scraper, &extractor).await,
        Err(err) => {
            error!("Setup failed: {:#}", err);
            RatesEnvelope::error(format!("{:#}", err))
        }
    };

    write_envelope(&config.output_path, &envelope).await?;

    match &envelope {
        RatesEnvelope::Success { data, .. } => info!(
            "✅ Saved {} city rates to {}",
            data.len(),
            config.output_path.display()
        ),
        RatesEnvelope::Error { message } => error!(
            "❌ Saved error envelope to {}: {}",
            config.output_path.display(),
            message
        ),
    }

    Ok(envelope)
}

fn prepare(config: &Config) -> Result<(AgbroScraper, CardExtractor)> {
    Ok((AgbroScraper::new(config)?, CardExtractor::new()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticPage(&'static str);

    #[async_trait]
    impl RateSource for StaticPage {
        async fn fetch_page(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn source_name(&self) -> &str {
            "static.test"
        }
    }

    struct Unreachable;

    #[async_trait]
    impl RateSource for Unreachable {
        async fn fetch_page(&self) -> Result<String> {
            Err(anyhow::anyhow!("Connection refused").context("Failed to fetch page"))
        }

        fn source_name(&self) -> &str {
            "unreachable.test"
        }
    }

    const PAGE: &str = r#"
        <div class="woodmart-info-box"><p>Prices as at today</p></div>
        <div class="woodmart-info-box">
          <div class="info-box-subtitle">Ibadan</div>
          <div class="info-box-inner"><strong>318</strong></div>
        </div>
    "#;

    #[tokio::test]
    async fn success_envelope_from_page() {
        let envelope = collect(&StaticPage(PAGE), &CardExtractor::new().unwrap()).await;

        let RatesEnvelope::Success { source, data, last_updated } = envelope else {
            panic!("expected success");
        };
        assert_eq!(source, "static.test");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].city, "Ibadan");
        assert_eq!(data[0].price, "318");
        assert_eq!(last_updated.len(), "2024-01-01 12:00:00".len());
    }

    #[tokio::test]
    async fn empty_page_is_still_success() {
        let envelope = collect(&StaticPage("<html></html>"), &CardExtractor::new().unwrap()).await;
        assert!(envelope.is_success());
        assert!(envelope.records().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_becomes_error_envelope() {
        let envelope = collect(&Unreachable, &CardExtractor::new().unwrap()).await;

        let RatesEnvelope::Error { message } = envelope else {
            panic!("expected error");
        };
        assert_eq!(message, "Failed to fetch page: Connection refused");
    }
}
