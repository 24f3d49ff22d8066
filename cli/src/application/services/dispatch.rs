//! Application service: authenticated request dispatch.
//!
//! Every authenticated call to the control API goes through [`dispatch`],
//! which adds the credential header and otherwise forwards the request
//! untouched. Responses and transport errors come back exactly as the
//! transport produced them.

use anyhow::Result;

use crate::application::ports::{HttpTransport, Method, RequestOptions};

/// Header carrying the caller's token.
pub const AUTHORIZATION: &str = "Authorization";

/// Build the options actually sent: a copy of `extra` whose headers gain
/// `Authorization: token`.
///
/// Any caller header named `Authorization` (in any letter case) is replaced;
/// all other headers, the body and the query are copied as-is.
#[must_use]
pub fn authorized(token: &str, extra: &RequestOptions) -> RequestOptions {
    let mut headers = extra.headers.clone();
    headers.retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION));
    headers.insert(AUTHORIZATION.to_string(), token.to_string());
    RequestOptions {
        headers,
        body: extra.body.clone(),
        query: extra.query.clone(),
    }
}

/// Send one request with the token injected as the `Authorization` header.
///
/// The token is used verbatim (no scheme prefix, empty allowed). `extra` is
/// borrowed and never modified. Calls `transport.send` exactly once and
/// returns its result unchanged: no status interpretation, no retry.
///
/// # Errors
///
/// Whatever the transport returns.
pub async fn dispatch<T: HttpTransport>(
    transport: &T,
    method: Method,
    url: &str,
    token: &str,
    extra: &RequestOptions,
) -> Result<T::Response> {
    tracing::debug!(%method, url, "dispatching authenticated request");
    transport.send(method, url, authorized(token, extra)).await
}
