/* src/server/adapter/axum/src/lib.rs */

mod error;
mod extract;
mod middleware;
mod response;

use std::sync::Arc;

use inertia_server::InertiaServer;

pub use error::AxumError;
pub use extract::Inertia;
/// Re-export inertia-server core for convenience
pub use inertia_server;
pub use middleware::encrypt_history;
pub use response::InertiaResponse;

/// Extension trait that installs an `InertiaServer` on an Axum router.
pub trait InertiaRouterExt {
  /// Wrap every route registered so far with the Inertia layer.
  #[must_use]
  fn inertia(self, server: InertiaServer) -> Self;
}

impl<S> InertiaRouterExt for axum::Router<S>
where
  S: Clone + Send + Sync + 'static,
{
  fn inertia(self, server: InertiaServer) -> Self {
    let parts = Arc::new(server.into_parts());
    self.layer(axum::middleware::from_fn_with_state(parts, middleware::handle))
  }
}

/// Bind `addr` and serve `router` until the process exits.
pub async fn serve(router: axum::Router, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
  let listener = tokio::net::TcpListener::bind(addr).await?;
  let local_addr = listener.local_addr()?;
  tracing::info!("inertia backend running on http://localhost:{}", local_addr.port());
  axum::serve(listener, router).await?;
  Ok(())
}
