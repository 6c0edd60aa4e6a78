//! Minimal HTTP responder standing in for a running service.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// A canned response: status line code, content type and body.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

/// Serve `route` on a background thread; returns the base URL.
pub fn serve<F>(route: F) -> String
where
    F: Fn(&str, &str) -> Reply + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &route);
        }
    });
    format!("http://{addr}")
}

/// A healthy Fake Job Guru service.
pub fn healthy_service(method: &str, path: &str) -> Reply {
    match (method, path) {
        ("GET", "/health") => Reply::json(r#"{"status":"ok","app_version":"1.2.0"}"#),
        ("GET", "/") => Reply::html("<html><title>Fake Job Guru</title></html>"),
        ("POST", "/analyze_job") => Reply::json(
            r#"{"prediction":"scam","probabilities":{"scam":0.93,"legit":0.07},
                "risk_score":93.0,"signals":{"keywords_triggered":["no experience","$500/day"]}}"#,
        ),
        _ => Reply::status(404),
    }
}

fn handle<F>(stream: TcpStream, route: &F)
where
    F: Fn(&str, &str) -> Reply,
{
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    let reply = route(&method, &path);
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
