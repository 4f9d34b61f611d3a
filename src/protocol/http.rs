// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the bridge REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::{ApiResponse, Transport};

// ============================================================================
// HttpConfig - Connection parameters for a bridge
// ============================================================================

/// Configuration for reaching a bridge over HTTP.
///
/// # Examples
///
/// ```
/// use huesync::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.2", "my-app-user")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.api_url(), "http://192.168.1.2:8080/api/my-app-user");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    username: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the given bridge and API username.
    #[must_use]
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            username: username.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Replaces the API username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the API username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Builds the authenticated API root, `<base>/api/<username>`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url(),
            urlencoding::encode(&self.username)
        )
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, TransportError> {
        if self.host.trim().is_empty() {
            return Err(TransportError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpClient {
            api_url: self.api_url(),
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the bridge REST API.
///
/// Each call is a single request; nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use huesync::protocol::{HttpConfig, Transport};
///
/// # async fn example() -> huesync::Result<()> {
/// let client = HttpConfig::new("192.168.1.2", "my-app-user").into_client()?;
/// let reply = client
///     .put("/lights/1/state", &serde_json::json!({"on": true}))
///     .await?;
/// println!("{}", reply.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    api_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Returns the authenticated API root.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.api_url)
        } else {
            format!("{}/{path}", self.api_url)
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            #[allow(clippy::cast_possible_truncation)]
            let millis = self.timeout.as_millis() as u64;
            TransportError::Timeout(millis)
        } else {
            TransportError::Http(err)
        }
    }

    async fn read_reply(&self, response: reqwest::Response) -> Result<ApiResponse, TransportError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransportError::Unauthorized);
        }

        if !status.is_success() {
            return Err(TransportError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_send_error(err))?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(ApiResponse::new(body))
    }
}

impl Transport for HttpClient {
    async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, body = %body, "Sending HTTP PUT");

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        self.read_reply(response).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        self.read_reply(response).await
    }
}
