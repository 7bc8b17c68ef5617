//! One-shot HTTP server for exercising provider clients over a real socket.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Answers the first request with `status` and `body`, then closes.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub(crate) async fn respond_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let url = format!("http://{}", listener.local_addr().unwrap());

	let handle = tokio::spawn(async move {
		let (mut stream, _) = listener.accept().await.unwrap();
		let request = read_request(&mut stream).await;
		let response = format!(
			"HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
			body.len()
		);
		stream.write_all(response.as_bytes()).await.unwrap();
		stream.shutdown().await.ok();
		request
	});

	(url, handle)
}

/// A listener that accepts connections into its backlog but never answers.
///
/// Keep the listener alive for as long as the request should hang.
pub(crate) async fn never_respond() -> (String, TcpListener) {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let url = format!("http://{}", listener.local_addr().unwrap());
	(url, listener)
}

async fn read_request(stream: &mut TcpStream) -> String {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 1024];
	loop {
		let n = stream.read(&mut chunk).await.unwrap_or(0);
		if n == 0 {
			break;
		}
		buf.extend_from_slice(&chunk[..n]);
		if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
			let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
			let content_length = head
				.lines()
				.find_map(|l| l.strip_prefix("content-length:"))
				.and_then(|v| v.trim().parse::<usize>().ok())
				.unwrap_or(0);
			if buf.len() >= end + 4 + content_length {
				break;
			}
		}
	}
	String::from_utf8_lossy(&buf).into_owned()
}
