use super::open_api;
use crate::{
    config::app_config,
    modules::{
        auth::{
            self,
            rate_limit::{FixedWindowLimiter, RateLimiter},
            service::AuthService,
        },
        b2b, billing, booking,
        common::responses::SimpleError,
        driver, fleet, pricing,
    },
};
use axum::{body::Body, extract::OriginalUri, routing::get, Router};
use axum_client_ip::SecureClientIpSource;
use http::{header, HeaderValue, Method, Request, StatusCode};
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP
/// request and thus its fields should contain types that are cheap
/// to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth_service: AuthService,

    /// limits credential login attempts per client ip
    pub login_limiter: Arc<dyn RateLimiter>,

    /// limits phone OTP requests per client ip
    pub otp_limiter: Arc<dyn RateLimiter>,
}

/// Creates the main axum router/controller to be served over http
pub fn new(db: DatabaseConnection) -> Router {
    let rng = ChaCha8Rng::seed_from_u64(OsRng.next_u64());

    let state = AppState {
        db: db.clone(),
        auth_service: AuthService::new(db, rng),
        login_limiter: Arc::new(FixedWindowLimiter::for_login()),
        otp_limiter: Arc::new(FixedWindowLimiter::for_otp()),
    };

    // a trailing slash on the configured origin would never match
    // the Origin request header
    let mut frontend_origin = app_config().frontend_origin.clone();
    if frontend_origin.ends_with('/') {
        frontend_origin.pop();
    }

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(
            frontend_origin
                .parse::<HeaderValue>()
                .expect("failed to parse CORS allowed origins"),
        )
        .allow_credentials(true)
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    // extracts the client IP from the request, this is harder than it sounds and should be
    // done by a lib to deal with edge cases such as extracting the original IP from a header
    // set by cloudflare or other load balancers.
    let ip_extractor_layer = SecureClientIpSource::ConnectInfo.into_extension();

    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ));

    let global_middlewares = ServiceBuilder::new()
        .layer(ip_extractor_layer)
        .layer(tracing_layer)
        .layer(cors)
        .layer(security_headers);

    let admin_router = booking::routes::create_admin_router(state.clone())
        .nest("/drivers", driver::routes::create_router(state.clone()));

    let b2b_router = b2b::routes::create_router(state.clone())
        .merge(billing::routes::create_router(state.clone()));

    let api_router = Router::new()
        .nest("/auth", auth::routes::create_router(state.clone()))
        .nest("/fleet", fleet::routes::create_router(state.clone()))
        .nest("/pricing", pricing::routes::create_router(state.clone()))
        .nest(
            "/bookings",
            booking::routes::create_user_router(state.clone()),
        )
        .nest("/b2b", b2b_router)
        .nest("/admin", admin_router);

    Router::new()
        .merge(open_api::create_openapi_router())
        .route("/healthcheck", get(healthcheck))
        .nest("/api/v1", api_router)
        .fallback(handler_404)
        .layer(global_middlewares)
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses((status = OK)),
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}

async fn handler_404(OriginalUri(uri): OriginalUri) -> (StatusCode, SimpleError) {
    (
        StatusCode::NOT_FOUND,
        SimpleError::from(format!("no route for {}", uri.path())),
    )
}
