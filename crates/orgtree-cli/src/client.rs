//! Async HTTP client wrapping the orgtree JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use orgtree_core::{
  OrgNode,
  envelope::{LoadResponse, SaveRequest, SaveResponse},
};
use reqwest::Client;

/// Connection settings for the orgtree API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the orgtree JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// `GET /api/orgchart`
  pub async fn get_chart(&self) -> Result<LoadResponse> {
    let resp = self
      .auth(self.client.get(self.url("/orgchart")))
      .send()
      .await
      .context("GET /orgchart failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /orgchart → {}", resp.status()));
    }
    resp.json().await.context("deserialising org chart")
  }

  /// `POST /api/orgchart` with `{"tree": ...}`.
  ///
  /// Error statuses still carry the failure envelope, so its message is
  /// returned where the body can be read.
  pub async fn post_chart(&self, tree: &OrgNode) -> Result<SaveResponse> {
    let body = SaveRequest { tree: tree.clone() };
    let resp = self
      .auth(self.client.post(self.url("/orgchart")))
      .json(&body)
      .send()
      .await
      .context("POST /orgchart failed")?;

    let status = resp.status();
    match resp.json::<SaveResponse>().await {
      Ok(envelope) if status.is_success() => Ok(envelope),
      Ok(envelope) => Ok(SaveResponse {
        success: false,
        message: envelope.message.or_else(|| Some(format!("server returned {status}"))),
      }),
      Err(_) if !status.is_success() => Err(anyhow!("POST /orgchart → {status}")),
      Err(e) => Err(e).context("deserialising save response"),
    }
  }
}
