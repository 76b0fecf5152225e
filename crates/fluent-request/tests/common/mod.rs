//! Raw TCP servers for tests that need control mockito does not give

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const EMPTY_OK: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

/// Serve one empty 200 response after `delay`, returns the base URL
pub async fn slow_server(delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind local port");
    let addr = listener.local_addr().expect("Local address");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Accept connection");
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        tokio::time::sleep(delay).await;
        let _ = socket.write_all(EMPTY_OK).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

/// Serve one empty 200 response and hand back the raw request head
#[allow(dead_code)]
pub async fn capture_server() -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind local port");
    let addr = listener.local_addr().expect("Local address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Accept connection");
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];

        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("Read request");
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let _ = socket.write_all(EMPTY_OK).await;
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{}", addr), handle)
}
