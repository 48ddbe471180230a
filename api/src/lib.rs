//! HTTP surface of the interview prep backend.
//!
//! Everything under `/api` sits behind the bearer-token guard in
//! [`middleware_layer::auth`]. `/` and `/uploads` are public.

pub mod core {
    pub mod app_state;
}
pub mod error_handler;
pub mod middleware_layer {
    pub mod auth;
}
mod routes {
    pub mod ai {
        pub mod ai_request;
        pub mod generate_explanation_route;
        pub mod generate_questions_route;
    }
    pub mod questions {
        pub mod question_request;
        pub mod question_routes;
    }
    pub mod sessions {
        pub mod session_request;
        pub mod session_routes;
    }
}

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

use crate::{
    error_handler::AppError,
    middleware_layer::auth::protect,
    routes::{
        ai::{
            generate_explanation_route::generate_explanation,
            generate_questions_route::generate_questions,
        },
        questions::question_routes::{add_questions, toggle_pin, update_note},
        sessions::session_routes::{create_session, delete_session, get_session, my_sessions},
    },
};

pub use crate::core::app_state::{ApiConfig, AppState};
pub use middleware_layer::auth::{AuthUser, StaticTokenVerifier, TokenVerifier};

/// Builds state from the environment and serves until Ctrl+C / SIGTERM.
pub async fn start() -> Result<(), AppError> {
    let state = AppState::from_env()?;
    let address = state.config.address.clone();
    info!(model = state.llm.model(), "state initialized");

    let app = build_router(state);

    let listener = TcpListener::bind(&address).await.map_err(AppError::Bind)?;
    info!(%address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Full application router; tests drive it with `oneshot`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_origin.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    let protected = Router::new()
        .route("/api/ai/generate-questions", post(generate_questions))
        .route("/api/ai/generate-explanation", post(generate_explanation))
        .route("/api/sessions/create", post(create_session))
        .route("/api/sessions/my-sessions", get(my_sessions))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/questions/add", post(add_questions))
        .route("/api/questions/{id}/pin", post(toggle_pin))
        .route("/api/questions/{id}/note", post(update_note))
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    Router::new()
        .route("/", get(|| async { "API is running..." }))
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
