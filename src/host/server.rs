//! HTTP server adapter.
//!
//! Serves the submission endpoint on every route the supported hosting
//! platforms use, plus the landing page when a static directory is configured.

use std::any::Any;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, error, info};

use crate::{
    base::types::Void,
    interaction::submit_bug::{self, Reply, SubmitError},
    runtime::Runtime,
};

/// Routes that accept bug reports.
pub const SUBMIT_ROUTES: [&str; 3] = ["/submit-bug", "/api/submit-bug", "/.netlify/functions/submit-bug"];

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let body = match self.body {
            Some(_) => Body::from(self.body_text()),
            None => Body::empty(),
        };

        let mut response = body.into_response();
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers();

        response
    }
}

/// Build the application router.
pub fn router(runtime: Runtime) -> Router {
    let mut router = SUBMIT_ROUTES.iter().fold(Router::new(), |router, route| router.route(route, any(submit_bug)));

    if let Some(dir) = &runtime.config.static_dir {
        info!("Serving landing page from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CatchPanicLayer::custom(panic_reply))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(runtime)
}

/// Bind the configured address and serve until shutdown.
pub async fn serve(runtime: Runtime) -> Void {
    let address = format!("{}:{}", runtime.config.host, runtime.config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(runtime)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Server stopped.");

    Ok(())
}

async fn submit_bug(State(runtime): State<Runtime>, method: Method, body: Result<Bytes, BytesRejection>) -> Reply {
    match body {
        Ok(body) => submit_bug::handle(&runtime, &method, &body).await,
        Err(rejection) => Reply::failure(SubmitError::Rejected {
            status: rejection.status(),
            reason: rejection.body_text(),
        }),
    }
}

/// Keep the JSON and CORS contract even when a handler panics.
fn panic_reply(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    Reply::failure(SubmitError::Unexpected(format!("Handler panicked: {detail}"))).into_response()
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down ..."),
        () = terminate => info!("Received SIGTERM, shutting down ..."),
    }
}
