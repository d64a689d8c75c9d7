use crate::error::{BackendError, BackendErrorExt};
use crate::query::{Filter, ListQuery};
use crate::Backend;
use async_trait::async_trait;
use evhub_domain::config::BackendConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const APP_ID_HEADER: &str = "x-app-id";
const API_KEY_HEADER: &str = "api_key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct HttpBackendInner {
    client: Client,
    base: Url,
    app_id: String,
}

/// [`Backend`] over the hosted REST API.
///
/// Entity calls map to `{base}/api/apps/{app_id}/entities/{Entity}[/{id}]`; the signed-in user
/// is `entities/User/me`. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    inner: Arc<HttpBackendInner>,
}

impl HttpBackend {
    pub fn builder() -> HttpBackendBuilder {
        HttpBackendBuilder::new()
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, BackendError> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::Internal {
                message: "base URL cannot carry a path".into(),
                context: Some(self.inner.base.to_string().into()),
            })?
            .pop_if_empty()
            .extend(["api", "apps", self.inner.app_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn entity_url(&self, entity: &str, id: Option<&str>) -> Result<Url, BackendError> {
        self.endpoint(["entities", entity].into_iter().chain(id))
    }

    fn request(&self, method: Method, url: Url, query: &ListQuery) -> RequestBuilder {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        let request = self.inner.client.request(method, url);
        if params.is_empty() { request } else { request.query(&params) }
    }

    /// Sends a request; `Ok(None)` on 404, the decoded body (or `null` if empty) otherwise.
    async fn send(&self, request: RequestBuilder) -> Result<Option<Value>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(status, &body).into(),
                context: None,
            });
        }
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Value::Null));
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn send_list(&self, request: RequestBuilder) -> Result<Vec<Value>, BackendError> {
        match self.send(request).await? {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => serde_json::from_value(other).context("expected a list of records"),
        }
    }

    async fn send_existing(
        &self,
        request: RequestBuilder,
        what: String,
    ) -> Result<Value, BackendError> {
        self.send(request)
            .await?
            .ok_or(BackendError::NotFound { message: what.into(), context: None })
    }

    async fn probe(&self) -> Result<(), BackendError> {
        let url = self.endpoint(std::iter::empty())?;
        self.inner.client.get(url).send().await?;
        Ok(())
    }
}

/// Pulls `message`/`detail` out of a JSON error body, falling back to the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "detail", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_owned))
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                trimmed.to_owned()
            }
        })
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self), err)]
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Vec<Value>, BackendError> {
        let url = self.entity_url(entity, None)?;
        self.send_list(self.request(Method::GET, url, query)).await
    }

    #[instrument(skip(self), err)]
    async fn filter(
        &self,
        entity: &str,
        filter: &Filter,
        query: &ListQuery,
    ) -> Result<Vec<Value>, BackendError> {
        let url = self.entity_url(entity, None)?;
        let request = self.request(Method::GET, url, query).query(&[("q", filter.to_query())]);
        self.send_list(request).await
    }

    #[instrument(skip(self), err)]
    async fn get(&self, entity: &str, id: &str) -> Result<Option<Value>, BackendError> {
        let url = self.entity_url(entity, Some(id))?;
        self.send(self.inner.client.get(url)).await
    }

    #[instrument(skip(self, record), err)]
    async fn create(&self, entity: &str, record: Value) -> Result<Value, BackendError> {
        let url = self.entity_url(entity, None)?;
        self.send_existing(self.inner.client.post(url).json(&record), entity.to_owned()).await
    }

    #[instrument(skip(self, patch), err)]
    async fn update(&self, entity: &str, id: &str, patch: Value) -> Result<Value, BackendError> {
        let url = self.entity_url(entity, Some(id))?;
        self.send_existing(self.inner.client.put(url).json(&patch), format!("{entity} {id}")).await
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, entity: &str, id: &str) -> Result<(), BackendError> {
        let url = self.entity_url(entity, Some(id))?;
        self.send_existing(self.inner.client.delete(url), format!("{entity} {id}")).await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn me(&self) -> Result<Value, BackendError> {
        let url = self.entity_url("User", Some("me"))?;
        self.send_existing(self.inner.client.get(url), "current user".to_owned()).await
    }

    #[instrument(skip(self, patch), err)]
    async fn update_me(&self, patch: Value) -> Result<Value, BackendError> {
        let url = self.entity_url("User", Some("me"))?;
        self.send_existing(self.inner.client.put(url).json(&patch), "current user".to_owned()).await
    }

    #[instrument(skip_all, err)]
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(["auth", "change-password"])?;
        let body = json!({ "current_password": current_password, "new_password": new_password });
        self.send_existing(self.inner.client.post(url).json(&body), "password endpoint".to_owned())
            .await?;
        Ok(())
    }
}

/// Fluent configuration of an [`HttpBackend`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct HttpBackendBuilder {
    url: Option<String>,
    app_id: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    health_retries: u8,
    retry_delay: Duration,
}

impl Default for HttpBackendBuilder {
    fn default() -> Self {
        Self {
            url: None,
            app_id: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            health_retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl HttpBackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every field of the `[backend]` config section.
    pub fn config(mut self, config: &BackendConfig) -> Self {
        self.url = Some(config.url.clone());
        self.app_id = Some(config.app_id.clone());
        self.api_key.clone_from(&config.api_key);
        self.timeout = Duration::from_secs(config.timeout_seconds);
        self.health_retries = config.health_retries;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Per-request timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Startup health probes; `0` skips probing.
    pub const fn health_retries(mut self, retries: u8) -> Self {
        self.health_retries = retries;
        self
    }

    /// First backoff delay between probes, doubled after each failure.
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Validates the settings, builds the client and optionally waits for the backend.
    ///
    /// # Errors
    /// * [`BackendError::Validation`] for a missing URL or app id, a zero timeout, or header
    ///   values that cannot be sent;
    /// * [`BackendError::Url`] when the URL does not parse;
    /// * [`BackendError::Unavailable`] when every health probe failed.
    #[instrument(skip(self), fields(url = self.url, app_id = self.app_id))]
    pub async fn build(self) -> Result<HttpBackend, BackendError> {
        let raw_url = self.url.filter(|u| !u.trim().is_empty()).ok_or(BackendError::Validation {
            message: "backend URL is required".into(),
            context: None,
        })?;
        let app_id =
            self.app_id.filter(|id| !id.trim().is_empty()).ok_or(BackendError::Validation {
                message: "app id is required".into(),
                context: None,
            })?;
        if self.timeout.is_zero() {
            return Err(BackendError::Validation {
                message: "timeout must be greater than zero".into(),
                context: None,
            });
        }

        let base = Url::parse(&raw_url).context(raw_url.clone())?;
        if base.cannot_be_a_base() {
            return Err(BackendError::Validation {
                message: "backend URL must be hierarchical (http or https)".into(),
                context: Some(raw_url.into()),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(APP_ID_HEADER), header_value(&app_id, "app id")?);
        if let Some(key) = &self.api_key {
            let mut value = header_value(key, "api key")?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .context("building HTTP client")?;

        let backend = HttpBackend { inner: Arc::new(HttpBackendInner { client, base, app_id }) };

        let mut delay = self.retry_delay;
        for attempt in 1..=self.health_retries {
            match backend.probe().await {
                Ok(()) => break,
                Err(e) if attempt == self.health_retries => {
                    return Err(BackendError::Unavailable {
                        message: format!("unhealthy after {attempt} probes: {e}").into(),
                        context: Some(backend.inner.base.to_string().into()),
                    });
                },
                Err(e) => {
                    warn!(attempt, ?delay, error = %e, "Backend not ready, retrying...");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                },
            }
        }

        info!(base = %backend.inner.base, "Backend client ready");
        debug!(timeout = ?self.timeout, "HTTP backend configured");
        Ok(backend)
    }
}

fn header_value(raw: &str, what: &'static str) -> Result<HeaderValue, BackendError> {
    HeaderValue::from_str(raw).map_err(|e| BackendError::Validation {
        message: format!("{what} is not a valid header value: {e}").into(),
        context: None,
    })
}
