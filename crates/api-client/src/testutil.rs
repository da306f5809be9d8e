//! Canned-response HTTP servers for exercising the client against real
//! sockets.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve each canned response on one connection, in order, then stop.
/// Responses must carry `Connection: close` so the client reconnects
/// between attempts.
pub(crate) async fn spawn_sequence(responses: Vec<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        for response in responses {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = [0u8; 4096];
            let mut seen = Vec::new();
            loop {
                let n = stream.read(&mut buf).await.expect("read request");
                seen.extend_from_slice(&buf[..n]);
                if n == 0 || seen.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
        }
    });
    format!("http://{addr}")
}

/// One-shot variant: a single connection, a single canned response.
pub(crate) async fn spawn_one_shot(response: &'static str) -> String {
    spawn_sequence(vec![response]).await
}
