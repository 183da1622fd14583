//! HTTP gateway for the Roster backend
//!
//! Every outbound request is built, authorized, sent, and decoded here.
//! The gateway attaches the bearer token when the credential store holds
//! one, decodes response envelopes, and turns every way a call can fail
//! into a single [`ApiFailure`]. It never retries and never reacts to a
//! 401 beyond reporting it; session teardown is an explicit user action.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::HeaderMap};
use roster_api::envelope::{Envelope, ListEnvelope};
use roster_api::list::ListResult;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

use crate::{config::ClientConfig, credentials::CredentialStore, error::ApiFailure};

/// Single outbound door to the backend
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
    credentials: Option<Arc<CredentialStore>>,
    extra_headers: HeaderMap,
}

impl HttpGateway {
    /// Create a gateway that reads its bearer token from the store
    pub fn new(config: ClientConfig, credentials: Arc<CredentialStore>) -> Result<Self, ApiFailure> {
        Self::build(config, Some(credentials), HeaderMap::new())
    }

    /// Create a gateway for contexts without a credential store. The
    /// given headers are attached to every request verbatim; nothing is
    /// read from or written to any shared login state.
    pub fn with_headers(config: ClientConfig, headers: HeaderMap) -> Result<Self, ApiFailure> {
        Self::build(config, None, headers)
    }

    fn build(
        config: ClientConfig,
        credentials: Option<Arc<CredentialStore>>,
        extra_headers: HeaderMap,
    ) -> Result<Self, ApiFailure> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()
            .map_err(ApiFailure::transport)?;

        Ok(Self {
            client,
            config,
            credentials,
            extra_headers,
        })
    }

    /// Build the full URL for an API path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Make a GET request expecting envelope data
    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiFailure> {
        let request = self.authorize(self.client.get(self.build_url(path)));
        let response = self.send(request).await?;
        self.expect_data(response, fallback).await
    }

    /// Make a GET request with query parameters, expecting envelope data
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        fallback: &str,
    ) -> Result<T, ApiFailure> {
        let request = self.authorize(self.client.get(self.build_url(path)).query(query));
        let response = self.send(request).await?;
        self.expect_data(response, fallback).await
    }

    /// Make a GET request against a collection endpoint.
    ///
    /// `requested_page` and `requested_limit` feed the paging arithmetic
    /// when the server omits those fields from the envelope.
    pub async fn get_list<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        requested_page: u32,
        requested_limit: u32,
        fallback: &str,
    ) -> Result<ListResult<T>, ApiFailure> {
        let request = self.authorize(self.client.get(self.build_url(path)).query(query));
        let response = self.send(request).await?;
        let (status, body) = self.read_body(response).await?;
        if !status.is_success() {
            return Err(self.classify_rejection(status, &body, fallback));
        }

        let envelope: ListEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            error!("undecodable list response ({}): {}", status, e);
            ApiFailure::protocol(status, fallback)
        })?;
        if envelope.data.is_none() {
            warn!("list envelope carried no data: {}", fallback);
            return Err(ApiFailure::missing_data(status, envelope.code, fallback));
        }
        Ok(ListResult::from_envelope(
            envelope,
            requested_page,
            requested_limit,
        ))
    }

    /// Make a POST request with a JSON body, expecting envelope data
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiFailure> {
        let request = self.authorize(self.client.post(self.build_url(path)).json(body));
        let response = self.send(request).await?;
        self.expect_data(response, fallback).await
    }

    /// Make a PUT request with a JSON body. Succeeds on any 2xx
    /// envelope, with or without data.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<(), ApiFailure> {
        let request = self.authorize(self.client.put(self.build_url(path)).json(body));
        let response = self.send(request).await?;
        self.expect_ok(response, fallback).await
    }

    /// Make a bodyless PUT request. Succeeds on any 2xx envelope.
    pub async fn put_empty(&self, path: &str, fallback: &str) -> Result<(), ApiFailure> {
        let request = self.authorize(self.client.put(self.build_url(path)));
        let response = self.send(request).await?;
        self.expect_ok(response, fallback).await
    }

    /// Make a GET request and return the raw body bytes. Failure
    /// handling is identical to the JSON variants, only the success path
    /// differs.
    pub async fn get_bytes<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        fallback: &str,
    ) -> Result<Vec<u8>, ApiFailure> {
        let request = self.authorize(self.client.get(self.build_url(path)).query(query));
        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(ApiFailure::transport)?;
            return Err(self.classify_rejection(status, &body, fallback));
        }
        let bytes = response.bytes().await.map_err(ApiFailure::transport)?;
        Ok(bytes.to_vec())
    }

    /// Attach standing headers and the bearer token, if logged in.
    /// An absent token is not an error, the request goes out anonymous.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = if self.extra_headers.is_empty() {
            request
        } else {
            request.headers(self.extra_headers.clone())
        };
        match self.credentials.as_ref().and_then(|c| c.access_token()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send one request. No retries: a failed send surfaces as a
    /// transport failure and the caller decides whether to try again.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiFailure> {
        let request = request.build().map_err(ApiFailure::transport)?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!("{} {}", method, url);
        if self.config.verbose_http {
            let authorization = if request.headers().contains_key(reqwest::header::AUTHORIZATION) {
                "Bearer [REDACTED]"
            } else {
                "none"
            };
            debug!("{} {} authorization: {}", method, url, authorization);
            if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
                debug!("request body: {}", String::from_utf8_lossy(body));
            }
        }

        let started = Instant::now();
        match self.client.execute(request).await {
            Ok(response) => {
                debug!(
                    "{} {} -> {} ({} ms)",
                    method,
                    url,
                    response.status(),
                    started.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(e) => {
                warn!("{} {} transport failure: {}", method, url, e);
                Err(ApiFailure::transport(e))
            }
        }
    }

    async fn read_body(&self, response: Response) -> Result<(StatusCode, String), ApiFailure> {
        let status = response.status();
        let body = response.text().await.map_err(ApiFailure::transport)?;
        if self.config.verbose_http {
            debug!("response body ({}): {}", status, body);
        }
        Ok((status, body))
    }

    /// Decode a success envelope and require its data.
    async fn expect_data<T: DeserializeOwned>(
        &self,
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiFailure> {
        let (status, body) = self.read_body(response).await?;
        if !status.is_success() {
            return Err(self.classify_rejection(status, &body, fallback));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            error!("undecodable response ({}): {}", status, e);
            ApiFailure::protocol(status, fallback)
        })?;
        match envelope.data {
            Some(data) => Ok(data),
            None => {
                warn!("response envelope carried no data: {}", fallback);
                Err(ApiFailure::missing_data(status, envelope.code, fallback))
            }
        }
    }

    /// Accept any 2xx envelope, present or empty.
    async fn expect_ok(&self, response: Response, fallback: &str) -> Result<(), ApiFailure> {
        let (status, body) = self.read_body(response).await?;
        if !status.is_success() {
            return Err(self.classify_rejection(status, &body, fallback));
        }
        if body.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .map(|_| ())
            .map_err(|e| {
                error!("undecodable response ({}): {}", status, e);
                ApiFailure::protocol(status, fallback)
            })
    }

    /// Normalize a non-2xx response into an `ApiFailure`.
    ///
    /// Classification order:
    /// 1. structured envelope carrying a code or message wins,
    /// 2. a body that is itself a message string is used as-is,
    /// 3. anything else falls back to the operation's message.
    fn classify_rejection(&self, status: StatusCode, body: &str, fallback: &str) -> ApiFailure {
        if status == StatusCode::UNAUTHORIZED {
            // Observed only. Logging out on a stray 401 would destroy
            // session state the operator still owns.
            debug!("401 from backend, leaving the session untouched");
        }

        if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(body)
            && (envelope.code.is_some() || envelope.message.is_some())
        {
            let message = envelope.message.unwrap_or_default();
            let payload = serde_json::from_str(body).ok();
            let failure = ApiFailure::domain(status, envelope.code, message, payload);
            warn!("request rejected with {}: {}", status, failure.message());
            return failure;
        }

        if let Ok(text) = serde_json::from_str::<String>(body)
            && !text.trim().is_empty()
        {
            warn!("request rejected with {}: {}", status, text);
            return ApiFailure::domain(status, None, text, None);
        }

        // Some gateways answer in plain text. JSON that decodes but
        // carries neither code nor message is not a usable error body.
        if serde_json::from_str::<serde_json::Value>(body).is_err() {
            let text = body.trim();
            if !text.is_empty() {
                warn!("request rejected with {}: {}", status, text);
                return ApiFailure::domain(status, None, text.to_string(), None);
            }
        }

        warn!("request rejected with {} and no usable body", status);
        ApiFailure::protocol(status, fallback)
    }
}
