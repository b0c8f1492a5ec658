/* src/server/engine/rust/src/resolve.rs */

use serde_json::{Map, Value};

use crate::errors::InertiaError;
use crate::prop::{Prop, PropBag, PropValue};

/// Resolve a prop payload into concrete JSON.
///
/// Thunks are invoked once, nested maps are resolved key by key (post-order),
/// everything else passes through untouched. A failing thunk aborts resolution
/// and its error is returned unchanged.
pub fn resolve_value(value: &PropValue) -> Result<Value, InertiaError> {
  match value {
    PropValue::Value(v) => Ok(v.clone()),
    PropValue::Thunk(thunk) => thunk.call(),
    PropValue::Map(entries) => {
      let mut out = Map::with_capacity(entries.len());
      for (key, nested) in entries {
        out.insert(key.clone(), resolve_value(nested)?);
      }
      Ok(Value::Object(out))
    }
  }
}

pub fn resolve_prop(prop: &Prop) -> Result<Value, InertiaError> {
  match prop {
    Prop::Plain(value) | Prop::Always(value) | Prop::Merge { value, .. } => resolve_value(value),
    Prop::Optional(thunk) | Prop::Deferred { thunk, .. } => thunk.call(),
  }
}

/// Resolve every prop of an already-filtered bag, keeping key order.
pub fn resolve_props(props: &PropBag) -> Result<Map<String, Value>, InertiaError> {
  let mut out = Map::with_capacity(props.len());
  for (key, prop) in props {
    let value = resolve_prop(prop).inspect_err(|e| {
      tracing::debug!(prop = %key, error = %e, "prop resolution failed");
    })?;
    out.insert(key.clone(), value);
  }
  Ok(out)
}
