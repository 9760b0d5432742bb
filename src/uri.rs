use crate::error::ProxyError;

/// A request URI split into its forward-proxy parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUri {
    pub host: String,
    pub port: String,
    pub path: String,
}

/// Splits `http://host[:port]/path` into `(host, port, path)`.
///
/// Only `http://` (case-insensitive, 7 characters) is accepted; anything
/// else is a [`ProxyError::BadUri`]. `port` defaults to `"80"` and `path`
/// defaults to `"/"` when absent. The input is never mutated, unlike the
/// C original this proxy is modeled on, which mutated the hostname buffer
/// in place and had a variant that corrupted it by writing a stray `'\0'`
/// before copying — not reproducible here since we only ever read `uri`
/// and allocate fresh `String`s for the result.
pub fn parse_uri(uri: &str) -> Result<ParsedUri, ProxyError> {
    let prefix = match uri.as_bytes().get(..7) {
        Some(p) => p,
        None => return Err(ProxyError::BadUri),
    };
    if !prefix.eq_ignore_ascii_case(b"http://") {
        return Err(ProxyError::BadUri);
    }
    let rest = &uri[7..];

    let path_pos = rest.find('/');
    let pre_path = match path_pos {
        Some(p) => &rest[..p],
        None => rest,
    };
    let path = match path_pos {
        Some(p) => rest[p..].to_string(),
        None => "/".to_string(),
    };

    let (host, port) = match pre_path.find(':') {
        Some(c) => (
            pre_path[..c].to_string(),
            pre_path[c + 1..].to_string(),
        ),
        None => (pre_path.to_string(), "80".to_string()),
    };

    if host.is_empty() {
        return Err(ProxyError::BadUri);
    }

    Ok(ParsedUri { host, port, path })
}
