use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;

/// Adapts a raw byte stream into line-oriented and length-bounded binary reads.
///
/// Exposes exactly the two operations the transaction engine needs: a
/// line reader with a maximum line length (used for the request line and
/// client headers, which are always text), and a bounded binary reader
/// (used for relaying the origin's response, which may be arbitrary
/// bytes and must never be scanned for line endings).
pub struct BufferedReader {
    inner: BufReader<OwnedReadHalf>,
}

impl BufferedReader {
    pub fn new(read_half: OwnedReadHalf) -> Self {
        Self {
            inner: BufReader::new(read_half),
        }
    }

    /// Reads one line, including its trailing `\n` if present, up to
    /// `limit` bytes. Returns `Ok(None)` on immediate EOF (no bytes read
    /// at all), matching "if EOF, return silently" for the request line.
    pub async fn read_line(&mut self, limit: usize) -> std::io::Result<Option<String>> {
        let mut buf = Vec::new();
        let mut chunk = vec![0u8; limit];
        let mut total = 0usize;
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            if let Some(nl) = available.iter().position(|&b| b == b'\n') {
                let take = (nl + 1).min(limit - total);
                chunk[..take].copy_from_slice(&available[..take]);
                buf.extend_from_slice(&chunk[..take]);
                self.inner.consume(nl + 1);
                total += take;
                break;
            } else {
                let take = available.len().min(limit - total);
                buf.extend_from_slice(&available[..take]);
                self.inner.consume(take);
                total += take;
                if total >= limit {
                    break;
                }
            }
        }
        if buf.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Reads at most `limit` bytes in a single underlying read, never
    /// splitting on line boundaries. Returns `0` on EOF.
    pub async fn read_n(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf).await
    }

    pub fn into_inner(self) -> OwnedReadHalf {
        self.inner.into_inner()
    }
}
