use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

pub(crate) fn default_http_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Reads at most `limit` bytes of an error body. Read failures end the body
/// early instead of replacing the upstream status.
async fn read_error_body(response: reqwest::Response, limit: usize) -> String {
    let mut buf = Vec::with_capacity(limit.min(4096));
    let mut cut = false;
    let mut stream = response.bytes_stream();
    while let Some(Ok(chunk)) = stream.next().await {
        let take = chunk.len().min(limit - buf.len());
        buf.extend_from_slice(&chunk[..take]);
        if take < chunk.len() {
            cut = true;
            break;
        }
    }
    let mut body = String::from_utf8_lossy(&buf).into_owned();
    if cut {
        body.push_str("...(truncated)");
    }
    body
}

/// Transport errors carry the request url, which may hold a credential in
/// its query string. Strip it before the error leaves the client.
fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Http(err.without_url())
}

pub(crate) async fn send_checked(
    req: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ProviderError> {
    let response = req.send().await.map_err(transport_error)?;
    let status = response.status();
    if !status.is_success() {
        let body = read_error_body(response, MAX_ERROR_BODY_BYTES).await;
        return Err(ProviderError::Api { status, body });
    }
    Ok(response)
}

pub(crate) async fn send_checked_text(req: reqwest::RequestBuilder) -> Result<String, ProviderError> {
    let response = send_checked(req).await?;
    response.text().await.map_err(transport_error)
}

pub(crate) async fn send_checked_json<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let body = send_checked_text(req).await?;
    Ok(serde_json::from_str(&body)?)
}
