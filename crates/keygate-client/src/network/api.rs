use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

/// Normalized outcome of a single API call.
///
/// Server rejections and transport failures share this shape so callers
/// branch on `success` only. A transport failure has `status == 0` and the
/// underlying message in `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub success: bool,
    pub data: Option<Value>,
    pub status: u16,
    pub error: Option<String>,
}

impl CallResult {
    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            status: 0,
            error: Some(message.into()),
        }
    }

    /// Human-readable reason supplied by the server, if any.
    ///
    /// Plain string `detail` is returned verbatim. A list of validation
    /// entries carrying `msg` fields is joined with `"; "`.
    pub fn detail(&self) -> Option<String> {
        match self.data.as_ref()?.get("detail")? {
            Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
            Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }
}

/// Send one JSON request and normalize whatever comes back.
///
/// Never fails: any error before a JSON body is in hand becomes a
/// [`CallResult::network_error`].
pub async fn call_api<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    method: Method,
    body: Option<&B>,
) -> CallResult {
    tracing::debug!("{} {}", method, url);

    let mut request = client
        .request(method, url)
        .header(CONTENT_TYPE, "application/json");

    if let Some(body) = body {
        request = request.json(body);
    }

    match send(request).await {
        Ok(result) => {
            tracing::debug!("{} answered {}", url, result.status);
            result
        }
        Err(e) => {
            tracing::warn!("Request to {} failed: {}", url, e);
            CallResult::network_error(e.to_string())
        }
    }
}

async fn send(request: RequestBuilder) -> reqwest::Result<CallResult> {
    let response = request.send().await?;
    let status = response.status();
    let data: Value = response.json().await?;

    Ok(CallResult {
        success: status.is_success(),
        data: Some(data),
        status: status.as_u16(),
        error: None,
    })
}
