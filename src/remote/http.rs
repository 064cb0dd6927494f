//! HTTP implementation of the payroll service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::warn;

use crate::config::RemoteConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{DocumentKind, Period};

use super::reply::{DocumentReply, decode_document_reply, decode_vacation_reply};
use super::service::PayrollService;

/// Endpoint of the vacation existence-check.
const VACATION_CHECK_ENDPOINT: &str = "folha_pagamento_tem_ferias.php";

/// A [`PayrollService`] that talks to the STV web service over HTTP.
///
/// Each request POSTs a JSON body of `{ cod_pessoa, vigencia }` to the
/// endpoint owned by the document kind. Transport failures and 5xx replies
/// are retried with linear backoff up to the configured attempt budget; the
/// original client performed no retries, which conflated "document does not
/// exist" with "request failed".
pub struct HttpPayrollService {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
    max_attempts: u32,
    backoff: Duration,
}

impl HttpPayrollService {
    /// Creates a client from the remote-service configuration.
    pub fn new(config: &RemoteConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport {
                endpoint: config.base_url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            bearer_token: None,
            max_attempts: config.retry.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry.backoff_ms),
        })
    }

    /// Attaches the session's bearer token to every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// POSTs the `{ cod_pessoa, vigencia }` body to an endpoint and returns
    /// the raw reply text, retrying transport failures and 5xx replies.
    async fn post(&self, endpoint: &str, person_id: &str, vigencia: &str) -> ServiceResult<String> {
        let url = format!("{}{}", self.base_url, endpoint);
        let body = json!({ "cod_pessoa": person_id, "vigencia": vigencia });

        let mut attempt = 0;
        loop {
            attempt += 1;

            let mut request = self.client.post(&url).json(&body);
            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }

            match request.send().await {
                Ok(response) if response.status().is_server_error() => {
                    if attempt < self.max_attempts {
                        warn!(
                            endpoint,
                            status = %response.status(),
                            attempt,
                            "server error, retrying"
                        );
                        tokio::time::sleep(self.backoff * attempt).await;
                        continue;
                    }
                    return Err(ServiceError::Transport {
                        endpoint: endpoint.to_string(),
                        message: format!("server replied {}", response.status()),
                    });
                }
                Ok(response) => {
                    let response =
                        response
                            .error_for_status()
                            .map_err(|e| ServiceError::Transport {
                                endpoint: endpoint.to_string(),
                                message: e.to_string(),
                            })?;
                    return response.text().await.map_err(|e| ServiceError::Transport {
                        endpoint: endpoint.to_string(),
                        message: format!("failed to read reply body: {}", e),
                    });
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(endpoint, error = %e, attempt, "transport failure, retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => {
                    return Err(ServiceError::Transport {
                        endpoint: endpoint.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

#[async_trait]
impl PayrollService for HttpPayrollService {
    async fn fetch_document(
        &self,
        person_id: &str,
        kind: DocumentKind,
        period: Period,
    ) -> ServiceResult<DocumentReply> {
        let endpoint = kind.endpoint();
        let body = self.post(endpoint, person_id, &period.vigencia()).await?;
        decode_document_reply(endpoint, &body)
    }

    async fn has_vacation(&self, person_id: &str, period: Period) -> ServiceResult<bool> {
        let body = self
            .post(VACATION_CHECK_ENDPOINT, person_id, &period.vigencia())
            .await?;
        decode_vacation_reply(VACATION_CHECK_ENDPOINT, &body)
    }
}
