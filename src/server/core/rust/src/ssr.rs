/* src/server/core/rust/src/ssr.rs */

//! Server-side rendering gateway. Every failure degrades to client-side
//! rendering; nothing here can fail a response.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use inertia_engine::PageObject;
use serde::Deserialize;

use crate::config::SsrConfig;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Markup produced by an external renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsrResponse {
  pub head: String,
  pub body: String,
}

pub trait SsrGateway: Send + Sync {
  /// Render `page`, or `None` when SSR is off or the renderer failed.
  fn dispatch(&self, page: PageObject) -> BoxFuture<Option<SsrResponse>>;
}

/// Gateway for deployments without a renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

impl SsrGateway for DisabledGateway {
  fn dispatch(&self, _page: PageObject) -> BoxFuture<Option<SsrResponse>> {
    Box::pin(async { None })
  }
}

#[derive(Deserialize)]
struct RenderPayload {
  #[serde(default)]
  head: Vec<String>,
  #[serde(default)]
  body: String,
}

/// Posts the page object to `{url}/render` on a Node renderer.
#[derive(Debug, Clone)]
pub struct HttpGateway {
  client: reqwest::Client,
  config: SsrConfig,
}

impl HttpGateway {
  pub fn new(config: SsrConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }

  pub fn with_client(client: reqwest::Client, config: SsrConfig) -> Self {
    Self { client, config }
  }

  pub fn config(&self) -> &SsrConfig {
    &self.config
  }
}

impl SsrGateway for HttpGateway {
  fn dispatch(&self, page: PageObject) -> BoxFuture<Option<SsrResponse>> {
    if !self.config.enabled {
      return Box::pin(async { None });
    }
    let client = self.client.clone();
    let url = self.config.render_url();
    let timeout = self.config.timeout();

    Box::pin(async move {
      let response = match client.post(&url).timeout(timeout).json(&page).send().await {
        Ok(r) => r,
        Err(e) => {
          tracing::warn!(%url, error = %e, "ssr gateway unreachable");
          return None;
        }
      };
      if !response.status().is_success() {
        tracing::warn!(%url, status = %response.status(), "ssr gateway returned an error");
        return None;
      }
      match response.json::<RenderPayload>().await {
        Ok(payload) => Some(SsrResponse { head: payload.head.join("\n"), body: payload.body }),
        Err(e) => {
          tracing::warn!(%url, error = %e, "ssr gateway sent an unreadable body");
          None
        }
      }
    })
  }
}

/// Run `gateway` with a hard deadline on top of whatever the gateway enforces.
pub async fn render_with_timeout(
  gateway: &dyn SsrGateway,
  page: &PageObject,
  timeout: Duration,
) -> Option<SsrResponse> {
  match tokio::time::timeout(timeout, gateway.dispatch(page.clone())).await {
    Ok(result) => result,
    Err(_) => {
      tracing::warn!(component = %page.component, ?timeout, "ssr render timed out");
      None
    }
  }
}

/// Head markup for `page`, or `""` when SSR is unavailable.
pub async fn compile_head(
  gateway: &dyn SsrGateway,
  page: &PageObject,
  timeout: Duration,
) -> String {
  render_with_timeout(gateway, page, timeout).await.map(|r| r.head).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use axum::Json;
  use axum::routing::post;
  use serde_json::{Map, json};

  use super::*;

  fn page() -> PageObject {
    PageObject {
      component: "Home".into(),
      props: Map::new(),
      url: "/".into(),
      version: String::new(),
      clear_history: false,
      encrypt_history: false,
      merge_props: vec![],
      deep_merge_props: vec![],
      deferred_props: Default::default(),
    }
  }

  struct SlowGateway;

  impl SsrGateway for SlowGateway {
    fn dispatch(&self, _page: PageObject) -> BoxFuture<Option<SsrResponse>> {
      Box::pin(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Some(SsrResponse { head: "<title>late</title>".into(), body: String::new() })
      })
    }
  }

  async fn spawn_renderer(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
  }

  #[tokio::test]
  async fn disabled_gateway_yields_nothing() {
    assert_eq!(compile_head(&DisabledGateway, &page(), Duration::from_millis(50)).await, "");
  }

  #[tokio::test]
  async fn http_gateway_disabled_by_config_never_calls_out() {
    let gateway = HttpGateway::new(SsrConfig::default());
    assert!(gateway.dispatch(page()).await.is_none());
  }

  #[tokio::test]
  async fn timeout_degrades_to_empty_head() {
    let head = compile_head(&SlowGateway, &page(), Duration::from_millis(20)).await;
    assert_eq!(head, "");
  }

  #[tokio::test]
  async fn unreachable_renderer_degrades() {
    let config = SsrConfig { enabled: true, url: "http://127.0.0.1:9".into(), timeout_ms: 200 };
    let gateway = HttpGateway::new(config);
    assert!(render_with_timeout(&gateway, &page(), Duration::from_secs(1)).await.is_none());
  }

  #[tokio::test]
  async fn renders_through_http() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let router = axum::Router::new().route(
      "/render",
      post(move |Json(page): Json<serde_json::Value>| {
        let seen = seen.clone();
        async move {
          seen.fetch_add(1, Ordering::SeqCst);
          Json(json!({
            "head": ["<title>Home</title>", "<meta name=\"x\">"],
            "body": format!("<div id=\"app\">{}</div>", page["component"].as_str().unwrap_or("")),
          }))
        }
      }),
    );
    let url = spawn_renderer(router).await;
    let gateway = HttpGateway::new(SsrConfig { enabled: true, url, timeout_ms: 2000 });

    let rendered = render_with_timeout(&gateway, &page(), Duration::from_secs(2)).await.unwrap();
    assert_eq!(rendered.head, "<title>Home</title>\n<meta name=\"x\">");
    assert_eq!(rendered.body, "<div id=\"app\">Home</div>");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn renderer_error_status_degrades() {
    let router = axum::Router::new()
      .route("/render", post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }));
    let url = spawn_renderer(router).await;
    let gateway = HttpGateway::new(SsrConfig { enabled: true, url, timeout_ms: 2000 });
    assert_eq!(compile_head(&gateway, &page(), Duration::from_secs(2)).await, "");
  }
}
