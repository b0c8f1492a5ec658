/* src/server/core/rust/src/server.rs */

use std::collections::HashMap;
use std::sync::Arc;

use inertia_engine::PropBag;

use crate::config::InertiaConfig;
use crate::context::{InertiaContext, Version};
use crate::request::RequestInfo;
use crate::ssr::{DisabledGateway, HttpGateway, SsrGateway};
use crate::validation::{ErrorSource, errors_prop};

pub type ShareFn = Arc<dyn Fn(&RequestInfo) -> PropBag + Send + Sync>;
pub type RootViewFn = Arc<dyn Fn(&RequestInfo) -> String + Send + Sync>;

/// Framework-agnostic parts extracted from `InertiaServer`.
/// Adapter crates build a fresh [`InertiaContext`] per request from these.
pub struct InertiaParts {
  pub config: InertiaConfig,
  /// Root view name -> HTML shell with `<!--inertia:head-->` / `<!--inertia:body-->` slots.
  pub root_views: HashMap<String, String>,
  pub version: Version,
  pub share: Option<ShareFn>,
  pub root_view_fn: Option<RootViewFn>,
  pub error_source: Option<Arc<dyn ErrorSource>>,
  pub gateway: Arc<dyn SsrGateway>,
}

impl InertiaParts {
  /// Per-request setup: version, root view, and shared props (`errors`
  /// first, then whatever the share hook returns).
  pub fn context_for(&self, request: &RequestInfo) -> InertiaContext {
    let mut ctx = InertiaContext::new().with_encrypt_history_default(self.config.encrypt_history);
    ctx.set_version(self.version.clone());

    let root_view = match self.root_view_fn {
      Some(ref f) => f(request),
      None => self.config.root_view.clone(),
    };
    ctx.set_root_view(root_view);

    if let Some(ref source) = self.error_source {
      ctx.share("errors", errors_prop(source.clone(), &request.headers));
    }
    if let Some(ref share) = self.share {
      ctx.share_many(share(request));
    }
    ctx
  }

  pub fn root_view_template(&self, name: &str) -> Option<&str> {
    self.root_views.get(name).map(String::as_str)
  }
}

pub struct InertiaServer {
  config: InertiaConfig,
  root_views: HashMap<String, String>,
  version: Version,
  share: Option<ShareFn>,
  root_view_fn: Option<RootViewFn>,
  error_source: Option<Arc<dyn ErrorSource>>,
  gateway: Option<Arc<dyn SsrGateway>>,
}

impl InertiaServer {
  pub fn new() -> Self {
    Self {
      config: InertiaConfig::default(),
      root_views: HashMap::new(),
      version: Version::None,
      share: None,
      root_view_fn: None,
      error_source: None,
      gateway: None,
    }
  }

  pub fn config(mut self, config: InertiaConfig) -> Self {
    self.config = config;
    self
  }

  /// Register an HTML shell under `name`.
  pub fn root_view(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
    self.root_views.insert(name.into(), template.into());
    self
  }

  /// Pick the root view per request instead of `config.root_view`.
  pub fn root_view_with<F>(mut self, f: F) -> Self
  where
    F: Fn(&RequestInfo) -> String + Send + Sync + 'static,
  {
    self.root_view_fn = Some(Arc::new(f));
    self
  }

  pub fn version(mut self, version: impl Into<Version>) -> Self {
    self.version = version.into();
    self
  }

  /// Props shared with every page, computed per request.
  pub fn share<F>(mut self, f: F) -> Self
  where
    F: Fn(&RequestInfo) -> PropBag + Send + Sync + 'static,
  {
    self.share = Some(Arc::new(f));
    self
  }

  pub fn error_source(mut self, source: Arc<dyn ErrorSource>) -> Self {
    self.error_source = Some(source);
    self
  }

  pub fn ssr_gateway(mut self, gateway: Arc<dyn SsrGateway>) -> Self {
    self.gateway = Some(gateway);
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  /// Without an explicit gateway, SSR-enabled configs get an [`HttpGateway`].
  pub fn into_parts(self) -> InertiaParts {
    let gateway = match self.gateway {
      Some(g) => g,
      None if self.config.ssr.enabled => Arc::new(HttpGateway::new(self.config.ssr.clone())),
      None => Arc::new(DisabledGateway),
    };
    InertiaParts {
      config: self.config,
      root_views: self.root_views,
      version: self.version,
      share: self.share,
      root_view_fn: self.root_view_fn,
      error_source: self.error_source,
      gateway,
    }
  }
}

impl Default for InertiaServer {
  fn default() -> Self {
    Self::new()
  }
}
