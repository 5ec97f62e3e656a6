//! Outbound client for the lead API

use crate::{
    config::LeadConfig,
    error::{AppError, Result},
    models::{LeadResponse, SubmissionPayload},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Sends one submission. Called at most once per submit attempt.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<LeadResponse>;
}

#[derive(Clone)]
pub struct HttpLeadClient {
    http: Client,
    config: LeadConfig,
}

impl HttpLeadClient {
    pub fn new(config: LeadConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl LeadSubmitter for HttpLeadClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<LeadResponse> {
        let kind = payload.kind();
        let url = kind.endpoint(&self.config);
        debug!(form = %kind, url = %url, "submitting lead");

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();

        // Rejections arrive in the body whatever the status; only an
        // undecodable body counts as a transport failure.
        match response.json::<LeadResponse>().await {
            Ok(body) if status.is_success() => Ok(body),
            Ok(body) => {
                warn!(form = %kind, status = status.as_u16(), "lead API rejected submission");
                Ok(LeadResponse {
                    success: false,
                    message: body.message,
                })
            }
            Err(e) => Err(AppError::Upstream(format!(
                "undecodable lead API response ({}) for {} form: {}",
                status, kind, e
            ))),
        }
    }
}
