//! Server Module
//!
//! Runs the router on a bound listener and bounds how long graceful shutdown
//! may wait for in-flight requests.

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// Serves `app` until `shutdown` resolves, then drains open connections.
///
/// Draining is given at most `drain_timeout`; connections still open after
/// that are dropped and the function returns `Ok(())`.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        biased;
        result = &mut server => result,
        Ok(()) = signalled_rx => {
            info!("Draining in-flight requests (timeout {:?})", drain_timeout);
            match tokio::time::timeout(drain_timeout, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        "Graceful shutdown timed out after {:?}, dropping open connections",
                        drain_timeout
                    );
                    Ok(())
                }
            }
        }
    }
}
