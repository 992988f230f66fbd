use crate::models::RatesEnvelope;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Serialize the envelope and write it in one go, replacing any previous file
pub async fn write_envelope(path: &Path, envelope: &RatesEnvelope) -> Result<()> {
    let json = serde_json::to_string_pretty(envelope).context("Failed to serialize envelope")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote envelope to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CityRate, Trend};
    use chrono::Local;

    #[tokio::test]
    async fn writes_indented_json_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rates.json");
        let envelope = RatesEnvelope::success(
            vec![CityRate {
                city: "Abuja".to_string(),
                price: "330".to_string(),
                trend: Trend::Up,
                change: "+6".to_string(),
                open_rate: "N/A".to_string(),
                close_rate: "N/A".to_string(),
                doc_rate: "N/A".to_string(),
            }],
            "agbro.com",
            Local::now(),
        );

        write_envelope(&path, &envelope).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"status\": \"success\""));
        let parsed: RatesEnvelope = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[tokio::test]
    async fn overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");

        write_envelope(&path, &RatesEnvelope::success(vec![], "agbro.com", Local::now()))
            .await
            .unwrap();
        write_envelope(&path, &RatesEnvelope::error("boom")).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"status": "error", "message": "boom"}));
    }
}
