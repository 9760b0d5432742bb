use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::cache::ProxyCache;
use crate::error::ProxyError;
use crate::headers::build_request_header;
use crate::io::BufferedReader;
use crate::response::write_error;
use crate::uri::parse_uri;
use crate::Config;

/// Runs one client transaction to completion: parse, cache lookup,
/// origin fetch, relay, opportunistic cache insert. All side effects are
/// confined to the client connection and the shared cache; nothing here
/// propagates a panic out of the worker task (every fallible client
/// write is caught and treated as "end of this transaction").
pub async fn serve_one(client: TcpStream, cache: ProxyCache, config: &Config) {
    let (client_read, mut client_write) = client.into_split();
    let mut reader = BufferedReader::new(client_read);

    let line = match reader.read_line(config.maxline).await {
        Ok(Some(l)) => l,
        Ok(None) => return,
        Err(e) => {
            debug!("error reading request line: {e}");
            return;
        }
    };

    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let uri = parts.next().unwrap_or("").to_string();
    // version (third token) is read but semantically ignored: every
    // outbound request is rewritten to HTTP/1.0 regardless.
    let _version = parts.next();

    if !method.eq_ignore_ascii_case("GET") {
        let err = ProxyError::NotImplemented(method);
        let (code, short, long) = err.response_triple();
        write_error(&mut client_write, code, short, &long).await;
        return;
    }

    if let Some(entry) = cache.find(&uri).await {
        info!("cache hit: {uri}");
        if client_write.write_all(&entry.content).await.is_ok() {
            cache.touch(&uri).await;
        }
        return;
    }
    debug!("cache miss: {uri}");

    let parsed = match parse_uri(&uri) {
        Ok(p) => p,
        Err(e) => {
            let (code, short, long) = e.response_triple();
            write_error(&mut client_write, code, short, &long).await;
            return;
        }
    };

    let origin = match TcpStream::connect(format!("{}:{}", parsed.host, parsed.port)).await {
        Ok(s) => s,
        Err(e) => {
            let err = ProxyError::BadGateway(e);
            let (code, short, long) = err.response_triple();
            write_error(&mut client_write, code, short, &long).await;
            return;
        }
    };

    let (mut origin_read, mut origin_write) = origin.into_split();

    let mut request = format!("GET {} HTTP/1.0\r\n", parsed.path);
    if let Err(e) = build_request_header(&mut reader, &mut request, &parsed.host).await {
        debug!("error reading client headers: {e}");
        return;
    }

    if origin_write.write_all(request.as_bytes()).await.is_err() {
        return;
    }

    let mut scratch = Vec::with_capacity(config.max_object_size.min(64 * 1024));
    let mut cacheable = true;
    let mut total: usize = 0;
    let mut buf = vec![0u8; config.maxline];

    loop {
        let n = match origin_read.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!("origin read error: {e}");
                break;
            }
        };

        if client_write.write_all(&buf[..n]).await.is_err() {
            // Client went away mid-relay; stop relaying, but an
            // already-complete capture is still worth caching below.
            break;
        }

        total += n;
        if cacheable {
            if total <= config.max_object_size {
                scratch.extend_from_slice(&buf[..n]);
            } else {
                cacheable = false;
                scratch.clear();
            }
        }
    }

    drop(origin_write);
    drop(origin_read);

    if cacheable && total > 0 {
        if cache.insert(&uri, Bytes::from(scratch), total).await {
            info!("cached: {uri} ({total} bytes)");
        }
    }
}
