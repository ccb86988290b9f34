//! HTTP client for the transactions API.
//!
//! Contract:
//! - `GET {base}/transactions` answers 200 with `{ transactions, balance }`
//! - `DELETE {base}/transactions/{id}` succeeds only with 204 No Content

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gofinances_core::TransactionsPayload;
use reqwest::{StatusCode, Url};

use crate::error::{ApiError, ApiResult};

/// Remote source of transactions
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    async fn list(&self) -> ApiResult<TransactionsPayload>;
    async fn delete(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
impl<T: TransactionsApi + ?Sized> TransactionsApi for Arc<T> {
    async fn list(&self) -> ApiResult<TransactionsPayload> {
        (**self).list().await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        (**self).delete(id).await
    }
}

/// `reqwest`-backed implementation
#[derive(Debug, Clone)]
pub struct HttpTransactionsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransactionsApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "not a hierarchical url".to_string(),
            });
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "not a hierarchical url".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl TransactionsApi for HttpTransactionsApi {
    async fn list(&self) -> ApiResult<TransactionsPayload> {
        let url = self.endpoint(&["transactions"])?;
        log::debug!("GET {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let payload: TransactionsPayload = serde_json::from_slice(&bytes)?;
        log::debug!("loaded {} transactions", payload.transactions.len());
        Ok(payload)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["transactions", id])?;
        log::debug!("DELETE {url}");

        let resp = self.client.delete(url).send().await?;
        let status = resp.status();
        if status != StatusCode::NO_CONTENT {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
