//! Authenticated HTTP transport for the GitHub REST API.
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, Method, Request,
    header::{
        ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
    },
};
use secrecy::ExposeSecret;
use serde_json::Value;
use url::Url;

use crate::{
    error::Result,
    forge::{
        config::{
            ACCEPT_MEDIA_TYPE, API_VERSION, RemoteConfig, USER_AGENT_VALUE,
        },
        traits::Transport,
        types::{ApiBody, ApiResponse},
    },
};

/// reqwest client carrying the auth, accept, version and user agent
/// headers on every request.
pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let token = config.token.expose_secret();

        let mut headers = HeaderMap::new();

        let mut token_value =
            HeaderValue::from_str(format!("Bearer {}", token).as_str())?;
        token_value.set_sensitive(true);

        headers.insert(AUTHORIZATION, token_value);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
        headers
            .insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder().build()?;

        Ok(Self { client, headers })
    }

    /// Build an authenticated request. A body is sent as JSON.
    pub fn build_request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Request> {
        let mut request =
            self.client.request(method, url).headers(self.headers.clone());

        if let Some(body) = body {
            // sets content-type: application/json
            request = request.json(body);
        }

        Ok(request.build()?)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        debug!("{method} {url}");

        let request = self.build_request(method, url, body.as_ref())?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let raw = response.text().await?;

        debug!("response status: {status}");

        let body =
            normalize_body(status.is_success(), content_type.as_deref(), raw)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a response body.
///
/// Error bodies are parsed as JSON when they parse and kept as text
/// otherwise. Success bodies are JSON only when the declared content type
/// says so, and a JSON success body that fails to parse is an error.
pub fn normalize_body(
    success: bool,
    content_type: Option<&str>,
    raw: String,
) -> Result<ApiBody> {
    if !success {
        return Ok(ApiBody::lenient(raw));
    }

    let is_json = content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);

    if is_json && !raw.trim().is_empty() {
        return Ok(ApiBody::Json(serde_json::from_str(&raw)?));
    }

    Ok(ApiBody::Text(raw))
}
