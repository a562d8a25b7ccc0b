//! HTTP client for the external transaction ledger (retrieval and
//! reversal endpoints).

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use api_types::reversal::{ReversalRequest, ReversalResponse};
use api_types::transaction::{
    Transaction, TransactionDetailResponse, TransactionPageResponse, TransactionQuery,
};
use engine::{
    EngineError, FetchOutcome, ResultEngine, ReversalApi, ReversalKind, TransactionStore,
};

pub use crate::config::{ClientConfig, load, load_from};

mod config;

/// Error body shape the ledger uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LedgerClient {
    base_url: Url,
    bearer_token: String,
    http: reqwest::Client,
}

impl LedgerClient {
    pub fn new(config: &ClientConfig) -> ResultEngine<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| EngineError::Validation(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| EngineError::Network(err.to_string()))?;
        Ok(Self {
            base_url,
            bearer_token: config.bearer_token.clone(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> ResultEngine<Url> {
        self.base_url
            .join(path)
            .map_err(|err| EngineError::Validation(format!("invalid endpoint {path}: {err}")))
    }

    /// Fetches one page of transactions.
    ///
    /// A `success == false` envelope or one without page data is an
    /// empty page, never an error.
    pub async fn transactions_list(&self, query: &TransactionQuery) -> ResultEngine<FetchOutcome> {
        let endpoint = self.endpoint("transactions")?;
        let response = self
            .http
            .get(endpoint)
            .bearer_auth(&self.bearer_token)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|err| EngineError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let envelope = response
            .json::<TransactionPageResponse>()
            .await
            .map_err(|err| EngineError::Server(format!("malformed envelope: {err}")))?;
        match envelope {
            TransactionPageResponse {
                success: true,
                data: Some(page),
                ..
            } => {
                let total_elements = page.total_elements.unwrap_or(page.content.len() as u64);
                Ok(FetchOutcome::Page {
                    content: page.content,
                    total_elements,
                })
            }
            other => {
                tracing::debug!(
                    success = other.success,
                    message = other.message.as_deref(),
                    "ledger returned no page data; treating as empty"
                );
                Ok(FetchOutcome::Empty)
            }
        }
    }

    /// Fetches a single transaction, e.g. to refresh the detail dialog.
    pub async fn transaction_get(&self, id: &str) -> ResultEngine<Option<Transaction>> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let response = self
            .http
            .get(endpoint)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|err| EngineError::Network(err.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let envelope = response
            .json::<TransactionDetailResponse>()
            .await
            .map_err(|err| EngineError::Server(format!("malformed envelope: {err}")))?;
        if envelope.success {
            Ok(envelope.data)
        } else {
            Ok(None)
        }
    }

    /// POST `/transactions/{reference}/reverse`.
    pub async fn standard_reverse(
        &self,
        reference: &str,
        request: &ReversalRequest,
    ) -> ResultEngine<ReversalResponse> {
        self.post_reversal(&format!("transactions/{reference}/reverse"), request)
            .await
    }

    /// POST `/transactions/{reference}/force-reverse`.
    pub async fn force_reverse(
        &self,
        reference: &str,
        request: &ReversalRequest,
    ) -> ResultEngine<ReversalResponse> {
        self.post_reversal(&format!("transactions/{reference}/force-reverse"), request)
            .await
    }

    async fn post_reversal(
        &self,
        path: &str,
        request: &ReversalRequest,
    ) -> ResultEngine<ReversalResponse> {
        let endpoint = self.endpoint(path)?;
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.bearer_token)
            .json(request)
            .send()
            .await
            .map_err(|err| EngineError::Network(err.to_string()))?;

        if !response.status().is_success() {
            let err = error_for_response(response).await;
            tracing::debug!(path, %err, "reversal request failed");
            return Err(err);
        }

        response
            .json::<ReversalResponse>()
            .await
            .map_err(|err| EngineError::Server(format!("malformed envelope: {err}")))
    }
}

/// Maps a non-2xx response to the error taxonomy, extracting the
/// ledger's message when the body carries one.
async fn error_for_response(response: reqwest::Response) -> EngineError {
    let status = response.status();
    let body = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| "unknown error".to_string());

    match status.as_u16() {
        401 | 403 => EngineError::Auth(body),
        400..=499 => EngineError::BadRequest(body),
        _ => EngineError::Server(body),
    }
}

impl TransactionStore for LedgerClient {
    fn fetch_page(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = ResultEngine<FetchOutcome>> + Send {
        self.transactions_list(query)
    }
}

impl ReversalApi for LedgerClient {
    fn reverse(
        &self,
        kind: ReversalKind,
        reference: &str,
        request: &ReversalRequest,
    ) -> impl Future<Output = ResultEngine<ReversalResponse>> + Send {
        async move {
            match kind {
                ReversalKind::Standard => self.standard_reverse(reference, request).await,
                ReversalKind::Force => self.force_reverse(reference, request).await,
            }
        }
    }
}
