use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;

/// Formats and writes a minimal HTML error document as an HTTP/1.0
/// response. Never touches cache state; write errors are swallowed
/// since the client has nothing further to receive from us.
pub async fn write_error(writer: &mut OwnedWriteHalf, code: u16, short: &str, long: &str) {
    let body = format!(
        "<html><title>Proxy Error</title><body bgcolor=\"ffffff\">\r\n\
         {code}: {short}\r\n\
         <p>{long}\r\n\
         <hr><em>The Proxy Web server</em>\r\n"
    );
    let response = format!(
        "HTTP/1.0 {code} {short}\r\n\
         Content-type: text/html\r\n\
         Content-length: {}\r\n\r\n\
         {body}",
        body.len()
    );
    let _ = writer.write_all(response.as_bytes()).await;
}
