//! Application service: control API resource helpers.
//!
//! Thin wrappers that build a URL and JSON payload and hand them to the
//! transport. Authenticated helpers go through [`dispatch`]; `create_user`
//! and `login` run before a token exists and call the transport directly.

use anyhow::Result;
use paas_api_types::{AppInfo, LoginRequest, NewApp, NewTeam, NewUser, PublicKey, Token};

use crate::application::ports::{ApiResponse, HttpTransport, Method, RequestOptions};
use crate::application::services::dispatch::dispatch;
use crate::domain::config::ApiSettings;
use crate::domain::error::ApiError;

/// Status and body of an authenticated call.
///
/// The text helpers hand back only `text`; callers that must know whether
/// the server accepted the request use the `*_reply` variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub text: String,
}

impl Reply {
    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] for any other status.
    pub fn into_success(self, operation: &'static str) -> Result<String> {
        if self.is_success() {
            return Ok(self.text);
        }
        Err(ApiError::UnexpectedStatus {
            operation,
            status: self.status,
            body: self.text,
        }
        .into())
    }
}

/// Client for the control API's app, user, team and key endpoints.
pub struct ApiClient<T> {
    transport: T,
    settings: ApiSettings,
}

impl<T: HttpTransport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T, settings: ApiSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `<api_url><path>`, tolerating a trailing slash on the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api_url.trim_end_matches('/'))
    }

    async fn authed(
        &self,
        method: Method,
        path: &str,
        token: &str,
        options: &RequestOptions,
    ) -> Result<Reply> {
        let response = dispatch(&self.transport, method, &self.url(path), token, options).await?;
        Ok(Reply {
            status: response.status_code(),
            text: response.text().to_string(),
        })
    }

    // ── Users ────────────────────────────────────────────────────────────────

    /// Register a user. Returns `true` when the server answered `201 Created`.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<bool> {
        let body = RequestOptions::json(&NewUser {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .transport
            .send(Method::Post, &self.url("/users"), body)
            .await?;
        Ok(response.status_code() == 201)
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] on a non-200 answer, a decode
    /// error if the body has no `token`, or the transport error unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = RequestOptions::json(&LoginRequest {
            password: password.to_string(),
        })?;
        let url = self.url(&format!("/users/{email}/tokens"));
        let response = self.transport.send(Method::Post, &url, body).await?;
        if response.status_code() != 200 {
            return Err(ApiError::UnexpectedStatus {
                operation: "login",
                status: response.status_code(),
                body: response.text().to_string(),
            }
            .into());
        }
        Ok(response.json::<Token>()?.token)
    }

    /// Remove the user owning `token`.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_user(&self, token: &str) -> Result<String> {
        Ok(self.remove_user_reply(token).await?.text)
    }

    /// [`Self::remove_user`] with the status kept.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_user_reply(&self, token: &str) -> Result<Reply> {
        self.authed(Method::Delete, "/users", token, &RequestOptions::default())
            .await
    }

    // ── Teams ────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn create_team(&self, name: &str, token: &str) -> Result<String> {
        Ok(self.create_team_reply(name, token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn create_team_reply(&self, name: &str, token: &str) -> Result<Reply> {
        let body = RequestOptions::json(&NewTeam {
            name: name.to_string(),
        })?;
        self.authed(Method::Post, "/teams", token, &body).await
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_team(&self, name: &str, token: &str) -> Result<String> {
        Ok(self.remove_team_reply(name, token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_team_reply(&self, name: &str, token: &str) -> Result<Reply> {
        self.authed(
            Method::Delete,
            &format!("/teams/{name}"),
            token,
            &RequestOptions::default(),
        )
        .await
    }

    // ── Keys ─────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn add_key(&self, key: &str, token: &str) -> Result<String> {
        Ok(self.add_key_reply(key, token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn add_key_reply(&self, key: &str, token: &str) -> Result<Reply> {
        let body = RequestOptions::json(&PublicKey {
            key: key.to_string(),
        })?;
        self.authed(Method::Post, "/users/keys", token, &body).await
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_key(&self, key: &str, token: &str) -> Result<String> {
        Ok(self.remove_key_reply(key, token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_key_reply(&self, key: &str, token: &str) -> Result<Reply> {
        let body = RequestOptions::json(&PublicKey {
            key: key.to_string(),
        })?;
        self.authed(Method::Delete, "/users/keys", token, &body).await
    }

    // ── Apps ─────────────────────────────────────────────────────────────────

    /// Create the configured app on the configured platform.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn create_app(&self, token: &str) -> Result<String> {
        Ok(self.create_app_reply(token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn create_app_reply(&self, token: &str) -> Result<Reply> {
        let body = RequestOptions::json(&NewApp {
            name: self.settings.app_name.clone(),
            platform: self.settings.platform.clone(),
        })?;
        self.authed(Method::Post, "/apps", token, &body).await
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_app(&self, token: &str) -> Result<String> {
        Ok(self.remove_app_reply(token).await?.text)
    }

    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn remove_app_reply(&self, token: &str) -> Result<Reply> {
        let path = format!("/apps/{}", self.settings.app_name);
        self.authed(Method::Delete, &path, token, &RequestOptions::default())
            .await
    }

    /// Fetch the configured app, including its git repository.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] on a non-200 answer, a decode
    /// error for a malformed body, or the transport error unchanged.
    pub async fn app_info(&self, token: &str) -> Result<AppInfo> {
        let url = self.url(&format!("/apps/{}", self.settings.app_name));
        let response =
            dispatch(&self.transport, Method::Get, &url, token, &RequestOptions::default()).await?;
        if response.status_code() != 200 {
            return Err(ApiError::UnexpectedStatus {
                operation: "app info",
                status: response.status_code(),
                body: response.text().to_string(),
            }
            .into());
        }
        response.json()
    }
}
