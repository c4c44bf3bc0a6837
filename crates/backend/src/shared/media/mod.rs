use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::shared::config::MediaConfig;

/// Asset stored on the image host: public URL plus the opaque handle the
/// host expects when asked to delete it.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub url: String,
    pub asset_ref: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    #[serde(rename = "assetRef")]
    asset_ref: String,
}

/// HTTP client for the image host
pub struct MediaClient {
    base_url: String,
    api_key: String,
    folder: String,
    http: reqwest::Client,
}

static MEDIA: OnceCell<MediaClient> = OnceCell::new();

pub fn init(config: &MediaConfig) {
    let client = MediaClient::new(config);
    let _ = MEDIA.set(client);
}

pub fn client() -> &'static MediaClient {
    MEDIA.get().expect("Media client has not been initialized")
}

impl MediaClient {
    pub fn new(config: &MediaConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            folder: config.folder.clone(),
            http,
        }
    }

    /// Upload one file; returns the public URL and the deletion handle.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> anyhow::Result<MediaAsset> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("folder", self.folder.clone())
            .part("file", part);

        let url = format!("{}/upload", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Media upload failed with status {}", response.status());
        }

        let body: UploadResponse = response.json().await?;
        Ok(MediaAsset {
            url: body.url,
            asset_ref: body.asset_ref,
        })
    }

    /// Delete an asset by its handle
    pub async fn delete(&self, asset_ref: &str) -> anyhow::Result<()> {
        let url = format!("{}/destroy", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "assetRef": asset_ref }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Media delete failed with status {}", response.status());
        }
        Ok(())
    }

    /// Delete an asset, downgrading any failure to a warning. Cleanup of
    /// old images must never fail the parent operation.
    pub async fn delete_best_effort(&self, asset_ref: &str) {
        if let Err(e) = self.delete(asset_ref).await {
            tracing::warn!("Failed to delete media asset {}: {}", asset_ref, e);
        }
    }
}
