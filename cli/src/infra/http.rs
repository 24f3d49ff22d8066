//! HTTP infrastructure: implements `HttpTransport` with blocking `ureq`
//! calls moved onto `spawn_blocking`.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{ApiResponse, HttpTransport, Method, RequestOptions};

/// Default bound for a single request, imposed by the agent.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse for HttpResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn text(&self) -> &str {
        &self.body
    }
}

/// Production transport.
///
/// 4xx/5xx answers are returned as `Ok(HttpResponse)`; only failures with no
/// response at all (connect, DNS, timeout) are errors.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(concat!("paas-integration/", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_TIMEOUT)
    }
}

impl HttpTransport for UreqTransport {
    type Response = HttpResponse;

    async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let agent = self.agent.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || send_blocking(&agent, method, &url, &options))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}

fn send_blocking(
    agent: &ureq::Agent,
    method: Method,
    url: &str,
    options: &RequestOptions,
) -> Result<HttpResponse> {
    let mut req = agent.request(method.as_str(), url);
    for (name, value) in &options.headers {
        req = req.set(name, value);
    }
    for (key, value) in &options.query {
        req = req.query(key, value);
    }

    let result = match &options.body {
        Some(body) => req.send_string(body),
        None => req.call(),
    };
    let response = match result {
        Ok(resp) | Err(ureq::Error::Status(_, resp)) => resp,
        Err(ureq::Error::Transport(t)) => return Err(t.into()),
    };

    let status = response.status();
    let body = response
        .into_string()
        .with_context(|| format!("reading response from {url}"))?;
    Ok(HttpResponse { status, body })
}
