//! HTTP surface: router, middleware, and server bootstrap.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    Extension, Router,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::store::FileStore;

pub mod error;
pub mod handlers;
pub mod notify;

use handlers::auth::{AuthState, SEED_PASSWORD};
use handlers::filaments::{seed_filaments, Filament, FILAMENTS_DOC};
use handlers::orders::{Order, ORDERS_DOC};
use notify::NotificationSink;

const PASSWORDS_DOC: &str = "passwords";

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec. The SPA fallback is
/// intentionally not documented.
fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(handlers::health::health))
        .routes(routes!(
            handlers::orders::list_orders,
            handlers::orders::create_order
        ))
        .routes(routes!(
            handlers::orders::update_order,
            handlers::orders::delete_order
        ))
        .routes(routes!(
            handlers::filaments::list_filaments,
            handlers::filaments::create_filament
        ))
        .routes(routes!(
            handlers::filaments::update_filament,
            handlers::filaments::delete_filament
        ))
        .routes(routes!(handlers::auth::login::login))
        .routes(routes!(handlers::auth::verify::verify))
        .routes(routes!(
            handlers::passwords::list_passwords,
            handlers::passwords::add_password
        ))
        .routes(routes!(handlers::passwords::remove_password));

    let tags = [
        ("orders", "Print order collection"),
        ("filaments", "Filament inventory"),
        ("auth", "Admin login flow"),
        ("admin", "Admin credential management"),
        ("health", "Service health"),
    ]
    .into_iter()
    .map(|(name, description)| {
        let mut tag = Tag::new(name);
        tag.description = Some(description.to_string());
        tag
    })
    .collect();
    router.get_openapi_mut().tags = Some(tags);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    OpenApiBuilder::new().info(info).build()
}

/// Assemble the application router with middleware and shared state.
///
/// Split from [`new`] so tests can drive the exact router the server runs
/// without binding a socket.
#[must_use]
pub fn app(
    store: FileStore,
    auth: Arc<AuthState>,
    notifier: Arc<dyn NotificationSink>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    let (router, openapi) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(store))
                .layer(Extension(auth))
                .layer(Extension(notifier)),
        )
}

/// Write the seed documents the first time the server runs, mirroring what
/// a fresh deployment expects to find on disk.
async fn bootstrap(store: &FileStore) -> Result<()> {
    let orders: Vec<Order> = store.load(ORDERS_DOC, Vec::new()).await;
    store.save(ORDERS_DOC, &orders).await?;

    let filaments: Vec<Filament> = store.load(FILAMENTS_DOC, seed_filaments()).await;
    store.save(FILAMENTS_DOC, &filaments).await?;

    let passwords: Vec<String> = store
        .load(PASSWORDS_DOC, vec![SEED_PASSWORD.to_string()])
        .await;
    store.save(PASSWORDS_DOC, &passwords).await?;

    Ok(())
}

/// Start the server.
/// # Errors
/// Returns an error if the seed documents cannot be written or the listener
/// fails to bind.
pub async fn new(
    port: u16,
    assets_dir: &Path,
    store: FileStore,
    auth: Arc<AuthState>,
    notifier: Arc<dyn NotificationSink>,
) -> Result<()> {
    bootstrap(&store)
        .await
        .context("Failed to write seed documents")?;

    // Any route the API does not claim falls through to the single-page app.
    let spa = ServeDir::new(assets_dir).fallback(ServeFile::new(assets_dir.join("index.html")));
    let app = app(store, auth, notifier).fallback_service(spa);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Gracefully shutdown");
    }
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
