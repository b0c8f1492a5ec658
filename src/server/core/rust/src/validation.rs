/* src/server/core/rust/src/validation.rs */

use std::sync::Arc;

use inertia_engine::{InertiaHeaders, Prop, PropValue};
use serde_json::{Map, Value};

/// Where flashed validation errors come from (usually the session).
pub trait ErrorSource: Send + Sync {
  fn errors(&self) -> Map<String, Value>;
}

impl ErrorSource for Map<String, Value> {
  fn errors(&self) -> Map<String, Value> {
    self.clone()
  }
}

/// Errors as the client expects them: `{}` when there are none, nested under
/// the error bag name when the request asks for one.
pub fn resolve_validation_errors(source: &dyn ErrorSource, headers: &InertiaHeaders) -> Value {
  let errors = source.errors();
  if errors.is_empty() {
    return Value::Object(Map::new());
  }
  match headers.error_bag {
    Some(ref bag) => {
      let mut wrapped = Map::new();
      wrapped.insert(bag.clone(), Value::Object(errors));
      Value::Object(wrapped)
    }
    None => Value::Object(errors),
  }
}

/// The `errors` prop shared on every response; resolved lazily, never filtered.
pub fn errors_prop(source: Arc<dyn ErrorSource>, headers: &InertiaHeaders) -> Prop {
  let headers = headers.clone();
  Prop::always(PropValue::thunk(move || Ok(resolve_validation_errors(source.as_ref(), &headers))))
}
