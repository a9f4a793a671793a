use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth_routes;
pub mod basket;
pub mod booking;
pub mod error;
pub mod flights;
pub mod home;
pub mod middleware;
pub mod profile_routes;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Screens that require a signed-in session.
    let protected = Router::new()
        .merge(basket::routes())
        .merge(profile_routes::routes())
        .merge(flights::booking_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::session_auth_middleware,
        ));

    Router::new()
        .merge(home::routes())
        .merge(booking::routes())
        .merge(flights::routes())
        .merge(auth_routes::routes())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
