//! Conversion API client.

use crate::error::{AcquireError, Result};
use crate::types::{AcquireKind, Conversion, ConvertResponse, ConverterConfig};
use reqwest::Client;
use tracing::{debug, info};

/// Client for the third-party conversion API.
///
/// One form-encoded `POST` per job: `url=<link>` to the audio endpoint, or
/// `url=<link>&quality=<tier>` to the video endpoint. The answer is a JSON
/// object with `filename` and `link`.
#[derive(Debug, Clone)]
pub struct ConverterClient {
    http: Client,
    config: ConverterConfig,
}

impl ConverterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ConverterConfig) -> Result<Self> {
        for endpoint in [&config.audio_endpoint, &config.video_endpoint] {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(AcquireError::Config(format!(
                    "endpoint must start with http:// or https://: {endpoint:?}"
                )));
            }
        }

        // No overall timeout: file downloads can legitimately take minutes.
        // The conversion request sets its own.
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Shared HTTP client, also used for the file downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Ask the backend to convert `link`.
    pub async fn convert(&self, link: &str, kind: AcquireKind) -> Result<Conversion> {
        let (endpoint, quality) = match kind {
            AcquireKind::Audio => (&self.config.audio_endpoint, None),
            AcquireKind::Video { quality } => (&self.config.video_endpoint, Some(quality)),
        };

        let mut form = vec![("url", link.to_string())];
        if let Some(quality) = quality {
            form.push(("quality", quality.as_str().to_string()));
        }

        debug!(endpoint = %endpoint, link = %link, ?quality, "Requesting conversion");

        let response = self
            .http
            .post(endpoint.as_str())
            .timeout(self.config.request_timeout)
            .form(&form)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = if error_text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                error_text
            };
            return Err(AcquireError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body: ConvertResponse = response.json().await.map_err(|e| {
            AcquireError::InvalidResponse(format!("Failed to parse conversion response: {}", e))
        })?;

        let conversion = match (body.filename, body.link) {
            (Some(file_name), Some(link)) if !file_name.is_empty() && !link.is_empty() => {
                Conversion { file_name, link }
            }
            _ => {
                return Err(AcquireError::InvalidResponse(
                    "response is missing `filename` or `link`".to_string(),
                ))
            }
        };

        info!(file_name = %conversion.file_name, "Conversion ready");
        Ok(conversion)
    }
}
