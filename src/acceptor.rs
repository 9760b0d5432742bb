use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::queue::HandoffQueue;

/// Binds a listening socket on `port` and forever accepts connections,
/// pushing each onto the handoff queue. Accept errors are transient
/// (e.g. a transient `EMFILE`) and are logged and skipped; the acceptor
/// never terminates on its own.
pub async fn run_acceptor(port: u16, queue: Arc<HandoffQueue>) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on port {port}");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("accepted connection from {addr}");
                if queue.push(stream).await.is_err() {
                    warn!("handoff queue closed, dropping accepted connection");
                }
            }
            Err(e) => {
                warn!("accept error: {e}");
            }
        }
    }
}
