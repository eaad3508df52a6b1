use std::net::SocketAddr;

use axum::{response::Html, routing::get, Router};
use eyre::WrapErr;
use isbn_lookup::Client;
use log::{error, info};
use tokio::{net::TcpListener, signal};

mod routes;

use routes::isbn_handler;

const INDEX_PAGE: &str = include_str!("page.html");

pub async fn serve(addr: SocketAddr) -> eyre::Result<()> {
    let app = router::<reqwest::blocking::Client>();

    info!("Binding to {addr}");
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    info!("Server shutting down..");
    Ok(())
}

pub(crate) fn router<C>() -> Router
where
    C: Client + Send + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/api/isbn/:isbn", get(isbn_handler::<C>))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
