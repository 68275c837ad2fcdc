use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Returns a token cancelled by the first SIGINT or SIGTERM.
///
/// A second signal terminates the process with exit code 1.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("received shutdown signal");
        cancel.cancel();

        shutdown_signal().await;
        warn!("received second shutdown signal, exiting");
        std::process::exit(1);
    });
    token
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "unable to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                warn!(%err, "unable to listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
