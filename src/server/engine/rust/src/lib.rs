/* src/server/engine/rust/src/lib.rs */

pub mod directive;
pub mod errors;
pub mod escape;
pub mod group;
pub mod header;
pub mod page;
pub mod partial;
pub mod prop;
pub mod resolve;

// Public API re-exports
pub use directive::{
  BODY_SLOT, DEFAULT_MOUNT_ID, HEAD_SLOT, compile_body, page_json, render_root_view,
};
pub use errors::InertiaError;
pub use escape::{escape_html_attr, escape_json_text};
pub use group::{DeferredGroups, MergeGroups, deferred_groups, merge_groups};
pub use header::InertiaHeaders;
pub use page::{HistoryFlags, PageObject, PageRequest, build_page};
pub use partial::filter_for_request;
pub use prop::{DEFAULT_DEFER_GROUP, MergeMode, Prop, PropBag, PropValue, Thunk};
pub use resolve::{resolve_prop, resolve_props, resolve_value};
