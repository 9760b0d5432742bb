use thiserror::Error;

/// Errors raised while carrying out one transaction.
///
/// Each variant maps to an exact HTTP/1.0 status/short/long triple emitted
/// by the error responder; nothing here escapes a single worker task.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy couldn't parse the URI")]
    BadUri,

    #[error("proxy does not implement this method: {0}")]
    NotImplemented(String),

    #[error("proxy couldn't connect to the server")]
    BadGateway(#[source] std::io::Error),
}

impl ProxyError {
    /// The `(code, short, long)` triple the error responder writes to the client.
    pub fn response_triple(&self) -> (u16, &'static str, String) {
        match self {
            ProxyError::BadUri => (400, "Bad Request", "Proxy couldn't parse the URI".into()),
            ProxyError::NotImplemented(method) => (
                501,
                "Not Implemented",
                format!("Proxy does not implement this method: {method}"),
            ),
            ProxyError::BadGateway(e) => (
                502,
                "Bad Gateway",
                format!("Proxy couldn't connect to the server: {e}"),
            ),
        }
    }
}
