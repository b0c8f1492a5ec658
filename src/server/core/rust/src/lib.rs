/* src/server/core/rust/src/lib.rs */

pub mod config;
pub mod context;
pub mod document;
pub mod negotiate;
pub mod request;
pub mod server;
pub mod ssr;
pub mod validation;

// Re-exports for ergonomic use
pub use config::{InertiaConfig, SsrConfig};
pub use context::{InertiaContext, Rendered, Version};
pub use document::render_document;
pub use inertia_engine::{
  self as engine, HistoryFlags, InertiaError, InertiaHeaders, MergeMode, PageObject, Prop,
  PropBag, PropValue, Thunk, header, props,
};
pub use negotiate::{Negotiated, ResponseParts, location, negotiate};
pub use request::RequestInfo;
pub use server::{InertiaParts, InertiaServer, RootViewFn, ShareFn};
pub use ssr::{BoxFuture, DisabledGateway, HttpGateway, SsrGateway, SsrResponse, compile_head};
pub use validation::{ErrorSource, errors_prop, resolve_validation_errors};
