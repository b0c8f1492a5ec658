/* demo/backend/rust/src/main.rs */

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use inertia_server::{InertiaConfig, InertiaServer, Prop, Version, props};
use inertia_server_axum::{AxumError, Inertia, InertiaResponse, InertiaRouterExt, encrypt_history};
use serde_json::{Map, json};
use tracing_subscriber::EnvFilter;

const SHELL: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <!--inertia:head-->
    <script type="module" src="/assets/app.js"></script>
  </head>
  <body>
    <!--inertia:body-->
  </body>
</html>
"#;

async fn dashboard(mut inertia: Inertia) -> Result<InertiaResponse, AxumError> {
  inertia.share_path("auth.user.name", "Ada");
  inertia
    .render(
      "Dashboard",
      props! {
        "greeting" => json!("Hello from Rust"),
        "stats" => Prop::optional(|| Ok(json!({"users": 42, "posts": 7}))),
        "activity" => Prop::defer(|| Ok(json!(["signed in", "posted"]))),
        "chart" => Prop::defer_in(|| Ok(json!([3, 1, 4, 1, 5])), "charts"),
        "posts" => Prop::merge(json!([{"id": 1}, {"id": 2}])),
        "settings" => Prop::deep_merge(json!({"theme": {"mode": "dark"}})),
        "csrf" => Prop::always(json!("token")),
      },
    )
    .await
}

async fn account(mut inertia: Inertia) -> Result<InertiaResponse, AxumError> {
  inertia.clear_history();
  inertia.render("Account", props! { "plan" => json!("free") }).await
}

async fn logout(inertia: Inertia) -> Response {
  inertia.location("/")
}

async fn update_profile() -> Response {
  (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn load_config() -> Result<InertiaConfig, Box<dyn std::error::Error>> {
  let path = Path::new("inertia.toml");
  if path.exists() {
    return Ok(InertiaConfig::load(path)?);
  }
  let mut config = InertiaConfig::default();
  config.apply_env_overrides(|name| std::env::var(name).ok());
  Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let server = InertiaServer::new()
    .config(load_config()?)
    .root_view("app", SHELL)
    .version(Version::dynamic(|| std::env::var("ASSET_VERSION").ok()))
    .share(|req| props! { "appName" => json!("Inertia Demo"), "path" => json!(req.path.clone()) })
    .error_source(Arc::new(Map::new()));

  let router = Router::new()
    .route("/", get(dashboard))
    .route("/account", get(account).layer(axum::middleware::from_fn(encrypt_history)))
    .route("/logout", post(logout))
    .route("/profile", post(update_profile).put(update_profile))
    .inertia(server);

  inertia_server_axum::serve(router, "0.0.0.0:3000").await
}
