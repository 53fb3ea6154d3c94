use std::{future::Future, io, path::Path, sync::Arc};

use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use tokio::net::UnixListener;
use tracing::{debug, info, warn};

use crate::{handlers::router_handler::route_handler, models::app_state::AppState};

/// Binds the unix socket, removing a stale socket file left by a previous run.
pub fn bind(socket_path: &Path) -> io::Result<UnixListener> {
    match std::fs::remove_file(socket_path) {
        Ok(()) => debug!(socket = %socket_path.display(), "removed stale socket"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    UnixListener::bind(socket_path)
}

/// Serves HTTP/1 on `listener` until `shutdown` resolves. Each connection
/// gets its own task; in-flight connections are not awaited on shutdown.
pub async fn serve<F>(listener: UnixListener, state: Arc<AppState>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let stream = match accepted {
                    Ok((stream, _)) => stream,
                    Err(err) => {
                        warn!(error = %err, "failed to accept connection");
                        continue;
                    }
                };
                let state = state.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |request| route_handler(request, state.clone()));
                    if let Err(err) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!(error = %err, "connection closed with error");
                    }
                });
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}
