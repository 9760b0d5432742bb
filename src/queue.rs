use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};

/// Bounded FIFO handoff between the acceptor and the worker pool.
///
/// Backed by a `tokio::sync::mpsc` channel of capacity `SBUFSIZE` — the
/// idiomatic substitute for the counting-semaphore-and-circular-buffer
/// construction this is modeled on. `push` awaits while the channel is
/// full; `pop` awaits while it is empty. The receiving half is shared by
/// `NTHREADS` workers behind a mutex so exactly one worker dequeues a
/// given connection, preserving FIFO single-consumer semantics.
pub struct HandoffQueue {
    tx: mpsc::Sender<TcpStream>,
    rx: Arc<Mutex<mpsc::Receiver<TcpStream>>>,
}

impl HandoffQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Blocks while the queue is full.
    pub async fn push(&self, handle: TcpStream) -> Result<(), mpsc::error::SendError<TcpStream>> {
        self.tx.send(handle).await
    }

    /// Blocks while the queue is empty. Returns `None` once every
    /// producer has dropped (never observed in normal operation, since
    /// the acceptor holds a sender for the process lifetime).
    pub async fn pop(&self) -> Option<TcpStream> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}
