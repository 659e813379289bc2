use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use nexus_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/navigation",
            get(handlers::navigation::navigation_handler),
        )
        .route(
            "/api/records/{collection}",
            get(handlers::records::list_records_handler)
                .post(handlers::records::create_record_handler),
        )
        .route(
            "/api/records/{collection}/{record_id}",
            get(handlers::records::get_record_handler)
                .put(handlers::records::update_record_handler)
                .delete(handlers::records::delete_record_handler),
        )
        .route(
            "/api/records/{collection}/{record_id}/secret",
            get(handlers::records::reveal_secret_handler),
        )
        .route("/api/team", get(handlers::team::list_team_handler))
        .route(
            "/api/team/{user_id}",
            delete(handlers::team::remove_member_handler),
        )
        .route(
            "/api/team/{user_id}/activate",
            post(handlers::team::activate_member_handler),
        )
        .route(
            "/api/team/{user_id}/approve-password",
            post(handlers::team::approve_password_change_handler),
        )
        .route(
            "/api/team/{user_id}/role",
            put(handlers::team::change_role_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/reset-password", post(auth::reset_password_handler))
        .route("/auth/logout", post(auth::logout_handler));

    Ok(public_routes
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
