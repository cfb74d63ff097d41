//! Shared helpers for integration tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Starts a one-shot server that promises a 1000-byte body but hangs up
/// after `body`. Returns its base URL.
pub fn truncated_body_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        drain_request(&mut stream);

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{body}"
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}")
}

/// Reads the request head and any body it announces, so that closing the
/// socket does not reset the connection before the client sees our response.
fn drain_request(stream: &mut impl Read) {
    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let read = stream.read(&mut chunk).unwrap();
        if read == 0 {
            return;
        }
        received.extend_from_slice(&chunk[..read]);
        if let Some(position) = received.windows(4).position(|w| w == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let head = String::from_utf8_lossy(&received[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body_read = received.len() - head_end;
    while body_read < content_length {
        let read = stream.read(&mut chunk).unwrap();
        if read == 0 {
            return;
        }
        body_read += read;
    }
}
