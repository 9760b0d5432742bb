use crate::io::BufferedReader;
use crate::MAXLINE;

const USER_AGENT_HDR: &str =
    "User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:10.0.3) Gecko/20120305 Firefox/10.0.3\r\n";
const CONN_HDR: &str = "Connection: close\r\n";
const PROXY_CONN_HDR: &str = "Proxy-Connection: close\r\n";

/// Consumes client headers line by line from `reader` until the blank
/// line terminator, appending the forwarded/rewritten block to `out`.
///
/// `out` is expected to already contain the rewritten request line
/// (`GET <path> HTTP/1.0\r\n`). The mandatory override headers are always
/// appended in fixed order regardless of what the client sent, and the
/// four headers they replace are stripped if the client sent them.
pub async fn build_request_header(
    reader: &mut BufferedReader,
    out: &mut String,
    host: &str,
) -> std::io::Result<()> {
    let mut other = String::new();
    let mut host_hdr: Option<String> = None;

    loop {
        let line = match reader.read_line(MAXLINE).await? {
            Some(l) => l,
            None => break,
        };
        if line == "\r\n" || line.is_empty() {
            break;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("host:") {
            host_hdr = Some(line);
        } else if lower.starts_with("user-agent:")
            || lower.starts_with("connection:")
            || lower.starts_with("proxy-connection:")
        {
            // dropped: replaced by the mandatory overrides below
        } else {
            other.push_str(&line);
        }
    }

    match host_hdr {
        Some(h) => out.push_str(&h),
        None => out.push_str(&format!("Host: {host}\r\n")),
    }
    out.push_str(CONN_HDR);
    out.push_str(PROXY_CONN_HDR);
    out.push_str(USER_AGENT_HDR);
    out.push_str(&other);
    out.push_str("\r\n");

    Ok(())
}
