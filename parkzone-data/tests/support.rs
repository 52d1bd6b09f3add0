//! Loopback HTTP stub standing in for an Overpass interpreter.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Server answering every request with a canned response.
pub struct StubServer {
    url: String,
    requests: Receiver<String>,
}

impl StubServer {
    /// Serve `body` with `status` for up to `times` requests.
    pub fn respond(status: u16, body: &str, times: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind stub server: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("stub server has no address: {err}"));
        let (sender, requests) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {length}\r\n\
             Connection: close\r\n\r\n{body}",
            reason = reason_phrase(status),
            length = body.len(),
        );
        thread::spawn(move || {
            for stream in listener.incoming().take(times) {
                let Ok(mut stream) = stream else { break };
                let request = read_request_body(&mut stream).unwrap_or_default();
                let _ = sender.send(request);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
                let _ = stream.shutdown(Shutdown::Write);
            }
        });
        Self {
            url: format!("http://{addr}/api/interpreter"),
            requests,
        }
    }

    /// Endpoint URL of the stub.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bodies of the requests served so far.
    pub fn received(&self) -> Vec<String> {
        self.requests.try_iter().collect()
    }
}

/// URL of a loopback port with nothing listening on it.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind probe listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("probe listener has no address: {err}"));
    drop(listener);
    format!("http://{addr}/api/interpreter")
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}

/// Read one HTTP request and return its body.
fn read_request_body(stream: &mut TcpStream) -> std::io::Result<String> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            return Ok(String::new());
        }
        buffer.extend_from_slice(&chunk[..read]);
        let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let body_start = header_end + 4;
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_ascii_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= body_start + length {
            let body = &buffer[body_start..body_start + length];
            return Ok(String::from_utf8_lossy(body).into_owned());
        }
    }
}
