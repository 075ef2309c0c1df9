//! Minimal HTTP/1.1 server standing in for the flipbook host in integration tests.
//!
//! Serves a fixed table of path → (status, body). Unknown paths get 404.
//! Every request path is recorded so tests can assert what was (not) fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct FlipbookServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FlipbookServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Request paths in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, u16, Vec<u8>)>) -> FlipbookServer {
    let routes: HashMap<String, (u16, Vec<u8>)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), (status, body)))
        .collect();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &routes, &log);
        }
    });

    FlipbookServer {
        base: format!("http://127.0.0.1:{port}"),
        requests,
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, Vec<u8>)>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(path.clone());

    let (status, body): (u16, &[u8]) = match routes.get(&path) {
        Some((status, body)) => (*status, body),
        None => (404, b"not found"),
    };
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        403 => "Forbidden",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
