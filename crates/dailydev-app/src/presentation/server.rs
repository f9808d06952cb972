use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

use crate::application::ResultExt;
use crate::presentation::router::build_router;
use crate::presentation::state::SharedState;
use dailydev_domain::shared::DomainError;
use dailydev_infrastructure::config::TimeoutConfig;

/// Serve HTTP until Ctrl-C or SIGTERM, letting in-flight requests finish.
pub async fn run(
    bind: &str,
    state: SharedState,
    timeouts: &TimeoutConfig,
) -> Result<(), DomainError> {
    let app = build_router(state, timeouts);

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| DomainError::Infrastructure(format!("Failed to bind {}: {}", bind, e)))?;
    info!("Server running on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .to_infra_err()?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
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
