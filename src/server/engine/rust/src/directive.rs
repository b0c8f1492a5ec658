/* src/server/engine/rust/src/directive.rs */

//! Embedding a page object into the HTML document.

use crate::errors::InertiaError;
use crate::escape::{escape_html_attr, escape_json_text};
use crate::page::PageObject;

pub const DEFAULT_MOUNT_ID: &str = "app";

/// Root view placeholder replaced by SSR head markup.
pub const HEAD_SLOT: &str = "<!--inertia:head-->";
/// Root view placeholder replaced by the mount element (or SSR body).
pub const BODY_SLOT: &str = "<!--inertia:body-->";

/// Serialize a page object in the escaped form used inside `data-page`.
pub fn page_json(page: &PageObject) -> Result<String, InertiaError> {
  let json = serde_json::to_string(page)?;
  Ok(escape_json_text(&json))
}

/// `<div id="{mount_id}" data-page="{html-encoded page JSON}"></div>`, on one line.
///
/// Surrounding single or double quotes on `mount_id` are stripped.
pub fn compile_body(page: &PageObject, mount_id: &str) -> Result<String, InertiaError> {
  let id = mount_id.trim_matches(|c| c == '\'' || c == '"');
  let id = if id.is_empty() { DEFAULT_MOUNT_ID } else { id };
  let encoded = escape_html_attr(&page_json(page)?);
  Ok(format!(r#"<div id="{}" data-page="{encoded}"></div>"#, escape_html_attr(id)))
}

/// Fill the root view's head and body slots.
///
/// A missing body slot falls back to inserting before `</body>`, then to
/// appending; a missing head slot falls back to inserting before `</head>`.
pub fn render_root_view(template: &str, head: &str, body: &str) -> String {
  let mut html = template.to_string();

  if html.contains(HEAD_SLOT) {
    html = html.replacen(HEAD_SLOT, head, 1);
  } else if let Some(pos) = html.find("</head>").filter(|_| !head.is_empty()) {
    html.insert_str(pos, head);
  }

  if html.contains(BODY_SLOT) {
    html = html.replacen(BODY_SLOT, body, 1);
  } else if let Some(pos) = html.rfind("</body>") {
    html.insert_str(pos, body);
  } else {
    html.push_str(body);
  }

  html
}

#[cfg(test)]
mod tests {
  use serde_json::{Map, json};

  use super::*;
  use crate::escape::unescape_html_attr;

  fn example_page() -> PageObject {
    let mut props = Map::new();
    props.insert("foo".into(), json!("bar"));
    PageObject {
      component: "Foo/Bar".into(),
      props,
      url: "/test".into(),
      version: String::new(),
      clear_history: false,
      encrypt_history: false,
      merge_props: vec![],
      deep_merge_props: vec![],
      deferred_props: Default::default(),
    }
  }

  fn data_page_attr(html: &str) -> &str {
    let start = html.find("data-page=\"").map(|p| p + "data-page=\"".len()).unwrap();
    let end = html[start..].find('"').map(|p| start + p).unwrap();
    &html[start..end]
  }

  #[test]
  fn renders_div_with_exact_bytes() {
    let html = compile_body(&example_page(), "app").unwrap();
    assert_eq!(
      html,
      "<div id=\"app\" data-page=\"{&quot;component&quot;:&quot;Foo\\/Bar&quot;,\
       &quot;props&quot;:{&quot;foo&quot;:&quot;bar&quot;},&quot;url&quot;:&quot;\\/test&quot;,\
       &quot;version&quot;:&quot;&quot;,&quot;clearHistory&quot;:false,\
       &quot;encryptHistory&quot;:false}\"></div>",
    );
  }

  #[test]
  fn custom_mount_id_and_quote_trimming() {
    let page = example_page();
    assert!(compile_body(&page, "my-app").unwrap().starts_with(r#"<div id="my-app""#));
    assert!(compile_body(&page, "'custom'").unwrap().starts_with(r#"<div id="custom""#));
    assert!(compile_body(&page, "\"custom\"").unwrap().starts_with(r#"<div id="custom""#));
    assert!(compile_body(&page, "").unwrap().starts_with(r#"<div id="app""#));
  }

  #[test]
  fn single_line_output() {
    let mut page = example_page();
    page.props.insert("bio".into(), json!("line one\nline two"));
    assert!(!compile_body(&page, "app").unwrap().contains('\n'));
  }

  #[test]
  fn decodes_back_to_page() {
    let mut page = example_page();
    page.props.insert("tricky".into(), json!("<script>alert('x') & \"y\"</script> caf\u{e9}"));
    page.merge_props = vec!["foo".into()];
    page.deferred_props.insert("charts".into(), vec!["stats".into()]);
    let html = compile_body(&page, "app").unwrap();
    let decoded = unescape_html_attr(data_page_attr(&html));
    let back: PageObject = serde_json::from_str(&decoded).unwrap();
    assert_eq!(back, page);
  }

  #[test]
  fn root_view_slots() {
    let template = "<html><head><!--inertia:head--></head><body><!--inertia:body--></body></html>";
    let html = render_root_view(template, "<title>Hi</title>", "<div id=\"app\"></div>");
    assert_eq!(
      html,
      "<html><head><title>Hi</title></head><body><div id=\"app\"></div></body></html>",
    );
  }

  #[test]
  fn root_view_without_slots() {
    let html = render_root_view("<html><head></head><body></body></html>", "<meta>", "<div></div>");
    assert_eq!(html, "<html><head><meta></head><body><div></div></body></html>");
    assert_eq!(render_root_view("", "", "<div></div>"), "<div></div>");
  }
}
