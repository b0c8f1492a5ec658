/* src/server/engine/rust/src/partial.rs */

use crate::header::InertiaHeaders;
use crate::prop::PropBag;

/// Select the props to resolve for this response.
///
/// First load: everything except props excluded from the first load.
/// Partial reload of `component`: `only` then `except`, then every `Always`
/// prop of the full bag is put back regardless of either list.
pub fn filter_for_request(props: &PropBag, headers: &InertiaHeaders, component: &str) -> PropBag {
  if !headers.is_partial_for(component) {
    return props
      .iter()
      .filter(|(_, prop)| !prop.excluded_from_first_load())
      .map(|(k, p)| (k.clone(), p.clone()))
      .collect();
  }

  let mut filtered: PropBag = if headers.only.is_empty() {
    props.clone()
  } else {
    props
      .iter()
      .filter(|(key, _)| headers.only.iter().any(|o| o == *key))
      .map(|(k, p)| (k.clone(), p.clone()))
      .collect()
  };

  for key in &headers.except {
    filtered.shift_remove(key);
  }

  tracing::debug!(
    component,
    only = ?headers.only,
    except = ?headers.except,
    kept = filtered.len(),
    "partial reload"
  );

  with_always(props, filtered)
}

/// Re-add every `Always` prop of `original`; always props lead, in original order.
fn with_always(original: &PropBag, filtered: PropBag) -> PropBag {
  let mut out: PropBag = original
    .iter()
    .filter(|(_, prop)| prop.is_always())
    .map(|(k, p)| (k.clone(), p.clone()))
    .collect();
  for (key, prop) in filtered {
    out.insert(key, prop);
  }
  out
}
