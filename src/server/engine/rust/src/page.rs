/* src/server/engine/rust/src/page.rs */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::InertiaError;
use crate::group::{DeferredGroups, deferred_groups, merge_groups};
use crate::header::InertiaHeaders;
use crate::partial::filter_for_request;
use crate::prop::PropBag;
use crate::resolve::resolve_props;

/// The page object sent to the client, as JSON or embedded in `data-page`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObject {
  pub component: String,
  pub props: Map<String, Value>,
  pub url: String,
  pub version: String,
  pub clear_history: bool,
  pub encrypt_history: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub merge_props: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub deep_merge_props: Vec<String>,
  #[serde(default, skip_serializing_if = "DeferredGroups::is_empty")]
  pub deferred_props: DeferredGroups,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFlags {
  pub clear: bool,
  pub encrypt: bool,
}

/// Everything the builder needs besides the props themselves.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
  pub headers: &'a InertiaHeaders,
  /// Request path as the transport layer reports it.
  pub url: &'a str,
  pub version: &'a str,
  pub history: HistoryFlags,
}

/// Assemble the page object for one response.
///
/// Filtering and resolution see only this request's subset; the merge and
/// defer topology is always computed from the full `props` bag.
pub fn build_page(
  component: &str,
  props: &PropBag,
  req: PageRequest<'_>,
) -> Result<PageObject, InertiaError> {
  let filtered = filter_for_request(props, req.headers, component);
  let resolved = resolve_props(&filtered)?;
  let merges = merge_groups(props);
  let deferred = deferred_groups(props, req.headers, component);

  Ok(PageObject {
    component: component.to_string(),
    props: resolved,
    url: req.url.to_string(),
    version: req.version.to_string(),
    clear_history: req.history.clear,
    encrypt_history: req.history.encrypt,
    merge_props: merges.merge,
    deep_merge_props: merges.deep_merge,
    deferred_props: deferred,
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::prop::Prop;
  use crate::props;

  fn first_load() -> InertiaHeaders {
    InertiaHeaders::default()
  }

  fn request<'a>(headers: &'a InertiaHeaders, version: &'a str) -> PageRequest<'a> {
    PageRequest { headers, url: "/user/123", version, history: HistoryFlags::default() }
  }

  #[test]
  fn standard_keys_in_wire_order() {
    let headers = first_load();
    let bag = props! { "name" => json!("Jonathon") };
    let page = build_page("User/Edit", &bag, request(&headers, "123")).unwrap();
    let json = serde_json::to_string(&page).unwrap();
    assert_eq!(
      json,
      r#"{"component":"User/Edit","props":{"name":"Jonathon"},"url":"/user/123","version":"123","clearHistory":false,"encryptHistory":false}"#,
    );
  }

  #[test]
  fn history_flags_are_carried() {
    let headers = first_load();
    let req = PageRequest {
      history: HistoryFlags { clear: true, encrypt: true },
      ..request(&headers, "")
    };
    let page = build_page("Home", &PropBag::new(), req).unwrap();
    assert!(page.clear_history);
    assert!(page.encrypt_history);
    assert_eq!(page.version, "");
  }

  #[test]
  fn deferred_scenario_first_load() {
    let bag = props! {
      "name" => json!("John"),
      "stats" => Prop::defer_in(|| Ok(json!({"visits": 10})), "charts"),
    };
    let headers = first_load();
    let page = build_page("Dashboard", &bag, request(&headers, "")).unwrap();
    assert!(!page.props.contains_key("stats"));
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["deferredProps"], json!({"charts": ["stats"]}));
    assert!(value.get("mergeProps").is_none());
  }

  #[test]
  fn deferred_scenario_partial_reload() {
    let bag = props! {
      "name" => json!("John"),
      "stats" => Prop::defer_in(|| Ok(json!({"visits": 10})), "charts"),
    };
    let headers = InertiaHeaders {
      inertia: true,
      partial_component: Some("Dashboard".into()),
      only: vec!["stats".into()],
      ..InertiaHeaders::default()
    };
    let page = build_page("Dashboard", &bag, request(&headers, "")).unwrap();
    assert_eq!(page.props.get("stats"), Some(&json!({"visits": 10})));
    assert!(!page.props.contains_key("name"));
    let value = serde_json::to_value(&page).unwrap();
    assert!(value.get("deferredProps").is_none());
  }

  #[test]
  fn merge_lists_are_present_when_non_empty() {
    let bag = props! {
      "posts" => Prop::merge(json!([1, 2])),
      "prefs" => Prop::deep_merge(json!({"theme": "dark"})),
    };
    let headers = first_load();
    let value =
      serde_json::to_value(build_page("Feed", &bag, request(&headers, "")).unwrap()).unwrap();
    assert_eq!(value["mergeProps"], json!(["posts"]));
    assert_eq!(value["deepMergeProps"], json!(["prefs"]));
    assert_eq!(value["props"]["posts"], json!([1, 2]));
  }

  #[test]
  fn merge_keys_reported_on_every_load() {
    let bag = props! { "posts" => Prop::merge(json!([1])), "name" => json!("x") };
    let first = InertiaHeaders::from_lookup(|name| {
      (name == "X-Inertia-Reset").then_some("posts")
    });
    let partial = InertiaHeaders {
      inertia: true,
      partial_component: Some("Feed".into()),
      only: vec!["name".into()],
      ..InertiaHeaders::default()
    };
    for headers in [first, partial] {
      let page = build_page("Feed", &bag, request(&headers, "")).unwrap();
      assert_eq!(page.merge_props, vec!["posts"]);
    }
  }

  #[test]
  fn resolution_failure_aborts_build() {
    let bag = props! {
      "boom" => Prop::always(crate::prop::PropValue::thunk(|| {
        Err(InertiaError::prop_resolution("db down"))
      })),
    };
    let headers = first_load();
    let err = build_page("Home", &bag, request(&headers, "")).unwrap_err();
    assert_eq!(err.message(), "db down");
  }

  #[test]
  fn first_load_never_exposes_excluded_props() {
    let bag = props! {
      "a" => Prop::optional(|| Ok(json!(1))),
      "b" => Prop::defer(|| Ok(json!(2))),
      "c" => Prop::defer(|| Ok(json!(3))).merged(),
      "d" => json!(4),
    };
    let headers = first_load();
    let page = build_page("Home", &bag, request(&headers, "")).unwrap();
    assert_eq!(page.props.keys().collect::<Vec<_>>(), vec!["d"]);
  }

  #[test]
  fn deserializes_back_from_wire() {
    let headers = first_load();
    let bag = props! { "stats" => Prop::defer(|| Ok(json!(1))), "x" => json!(true) };
    let page = build_page("Home", &bag, request(&headers, "v1")).unwrap();
    let text = serde_json::to_string(&page).unwrap();
    let back: PageObject = serde_json::from_str(&text).unwrap();
    assert_eq!(back, page);
  }
}
