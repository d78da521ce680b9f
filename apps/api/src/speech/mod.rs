//! Speech synthesis adapter for the hosted text-to-speech service.
//!
//! One synchronous submit. When the service answers with a job instead of
//! audio, the adapter waits a fixed delay, polls exactly once, and gives up
//! with [`SpeechError::StillProcessing`] if the job is not done.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod handlers;

pub const DEFAULT_VOICE: &str = "female-calm";
const OUTPUT_FORMAT: &str = "mp3";
const QUALITY: &str = "medium";
pub const MAX_TEXT_CHARS: usize = 3000;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("TTS API key is not configured")]
    NotConfigured,

    #[error("text to speak is empty")]
    EmptyText,

    #[error("text to speak exceeds {max} characters")]
    TextTooLong { max: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("job {job_id} is still processing")]
    StillProcessing { job_id: String },

    #[error("synthesis job failed: {0}")]
    JobFailed(String),

    #[error("malformed TTS response: {0}")]
    MalformedResponse(String),

    #[error("TTS base URL cannot carry a job path: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice: &'a str,
    output_format: &'a str,
    quality: &'a str,
}

/// Either a finished audio URL or a job to poll.
#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    audio_url: Option<String>,
    job_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
    audio_url: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    poll_delay: Duration,
}

impl SpeechClient {
    pub fn new(api_key: Option<String>, base_url: &str, poll_delay: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_delay,
        }
    }

    /// Returns a playable audio URL for `text`.
    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<String, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(SpeechError::TextTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        let api_key = self.api_key.as_deref().ok_or(SpeechError::NotConfigured)?;

        let body = SynthesisRequest {
            text,
            voice: voice.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_VOICE),
            output_format: OUTPUT_FORMAT,
            quality: QUALITY,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let submitted: SynthesisResponse = read_json(response).await?;

        match submitted {
            SynthesisResponse {
                audio_url: Some(url),
                ..
            } => {
                debug!("TTS returned audio synchronously");
                Ok(url)
            }
            SynthesisResponse {
                job_id: Some(job_id),
                ..
            } => self.poll_once(api_key, &job_id).await,
            _ => Err(SpeechError::MalformedResponse(
                "neither audio_url nor job_id present".to_string(),
            )),
        }
    }

    async fn poll_once(&self, api_key: &str, job_id: &str) -> Result<String, SpeechError> {
        info!("TTS job {job_id} queued, polling once after {:?}", self.poll_delay);
        tokio::time::sleep(self.poll_delay).await;

        let response = self
            .client
            .get(self.job_url(job_id)?)
            .bearer_auth(api_key)
            .send()
            .await?;
        let job: JobStatus = read_json(response).await?;

        match (job.status.as_str(), job.audio_url) {
            ("completed", Some(url)) => Ok(url),
            ("completed", None) => Err(SpeechError::MalformedResponse(format!(
                "job {job_id} completed without an audio_url"
            ))),
            ("failed", _) => Err(SpeechError::JobFailed(
                job.error.unwrap_or_else(|| "no reason given".to_string()),
            )),
            _ => Err(SpeechError::StillProcessing {
                job_id: job_id.to_string(),
            }),
        }
    }
}

impl SpeechClient {
    /// `{base}/jobs/{job_id}` with the upstream-issued id encoded as one
    /// path segment.
    fn job_url(&self, job_id: &str) -> Result<Url, SpeechError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SpeechError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| SpeechError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("jobs")
            .push(job_id);
        Ok(url)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SpeechError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SpeechError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SpeechError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SpeechClient {
        SpeechClient::new(Some("tts-key".to_string()), &server.uri(), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_network() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).synthesize("   ", None).await;
        assert!(matches!(result, Err(SpeechError::EmptyText)));
    }

    #[tokio::test]
    async fn test_too_long_text_rejected() {
        let server = MockServer::start().await;
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        let result = client(&server).synthesize(&text, None).await;
        assert!(matches!(result, Err(SpeechError::TextTooLong { .. })));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = SpeechClient::new(None, "http://127.0.0.1:9", Duration::ZERO);
        let result = client.synthesize("Hello", None).await;
        assert!(matches!(result, Err(SpeechError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_direct_audio_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer tts-key"))
            .and(body_partial_json(serde_json::json!({
                "text": "Namaste",
                "voice": "female-calm",
                "output_format": "mp3",
                "quality": "medium"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"audio_url": "https://cdn.test/a.mp3"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = client(&server).synthesize(" Namaste ", None).await.unwrap();
        assert_eq!(url, "https://cdn.test/a.mp3");
    }

    #[tokio::test]
    async fn test_job_ready_after_single_poll() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"job_id": "job-1", "status": "queued"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "audio_url": "https://cdn.test/job-1.mp3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = client(&server).synthesize("Hello", Some("male-warm")).await.unwrap();
        assert_eq!(url, "https://cdn.test/job-1.mp3");
    }

    #[tokio::test]
    async fn test_job_still_processing_gives_up_after_one_poll() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-2"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/job-2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "processing"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        match client(&server).synthesize("Hello", None).await {
            Err(SpeechError::StillProcessing { job_id }) => assert_eq!(job_id, "job-2"),
            other => panic!("expected StillProcessing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completed_job_without_url_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-4"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/job-4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "completed"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).synthesize("Hello", None).await;
        assert!(matches!(result, Err(SpeechError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_job_id_is_encoded_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"job_id": "../admin?x=1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/..%2Fadmin%3Fx=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "audio_url": "https://cdn.test/encoded.mp3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = client(&server).synthesize("Hello", None).await.unwrap();
        assert_eq!(url, "https://cdn.test/encoded.mp3");
    }

    #[test]
    fn test_job_url_keeps_base_path() {
        let client = SpeechClient::new(None, "https://tts.test/v1/tts/", Duration::ZERO);
        let url = client.job_url("job 9").unwrap();
        assert_eq!(url.as_str(), "https://tts.test/v1/tts/jobs/job%209");
    }

    #[tokio::test]
    async fn test_failed_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_id": "job-3"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/job-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "failed",
                "error": "voice not found"
            })))
            .mount(&server)
            .await;

        let result = client(&server).synthesize("Hello", None).await;
        assert!(matches!(result, Err(SpeechError::JobFailed(reason)) if reason == "voice not found"));
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        match client(&server).synthesize("Hello", None).await {
            Err(SpeechError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
