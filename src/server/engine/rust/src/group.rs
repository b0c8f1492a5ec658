/* src/server/engine/rust/src/group.rs */

//! Merge and defer topology, computed over the full unfiltered prop bag.

use indexmap::IndexMap;

use crate::header::InertiaHeaders;
use crate::prop::{MergeMode, PropBag};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeGroups {
  pub merge: Vec<String>,
  pub deep_merge: Vec<String>,
}

impl MergeGroups {
  pub fn is_empty(&self) -> bool {
    self.merge.is_empty() && self.deep_merge.is_empty()
  }
}

/// Group name -> prop keys, in discovery order.
pub type DeferredGroups = IndexMap<String, Vec<String>>;

/// Split mergeable keys into shallow and deep lists. Every mergeable key is
/// reported, whatever the request filtered.
pub fn merge_groups(props: &PropBag) -> MergeGroups {
  let mut groups = MergeGroups::default();
  for (key, prop) in props {
    match prop.merge_mode() {
      Some(MergeMode::Shallow) => groups.merge.push(key.clone()),
      Some(MergeMode::Deep) => groups.deep_merge.push(key.clone()),
      None => {}
    }
  }
  groups
}

/// Bucket deferred keys by group. Empty on any partial reload of `component`.
pub fn deferred_groups(
  props: &PropBag,
  headers: &InertiaHeaders,
  component: &str,
) -> DeferredGroups {
  let mut groups = DeferredGroups::new();
  if headers.is_partial_for(component) {
    return groups;
  }
  for (key, prop) in props {
    if let Some(group) = prop.defer_group() {
      groups.entry(group.to_string()).or_default().push(key.clone());
    }
  }
  groups
}
