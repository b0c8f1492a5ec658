/* src/server/core/rust/src/document.rs */

use inertia_engine::{InertiaError, PageObject, compile_body, render_root_view};

use crate::config::InertiaConfig;
use crate::ssr::{SsrGateway, render_with_timeout};

/// Render the full HTML document for a first visit.
///
/// With a working SSR gateway its head and body fill the root view; without
/// one the head slot is emptied and the body is the `data-page` mount element.
pub async fn render_document(
  page: &PageObject,
  template: &str,
  gateway: &dyn SsrGateway,
  config: &InertiaConfig,
) -> Result<String, InertiaError> {
  let (head, body) = match render_with_timeout(gateway, page, config.ssr.timeout()).await {
    Some(ssr) if !ssr.body.is_empty() => (ssr.head, ssr.body),
    Some(ssr) => (ssr.head, compile_body(page, &config.mount_id)?),
    None => (String::new(), compile_body(page, &config.mount_id)?),
  };
  Ok(render_root_view(template, &head, &body))
}
