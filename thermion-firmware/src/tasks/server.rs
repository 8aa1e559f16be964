//! Override HTTP endpoint
//!
//! A single-socket HTTP/1.1 listener with two routes: a health probe and
//! a manual override that pushes a reading onto the display. Useful for
//! testing the panel without a working source.

use core::fmt::Write as _;

use defmt::*;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{Duration, Timer};
use heapless::String;

use thermion_core::display::{READING_MAX, READING_MIN};

use crate::channels::OVERRIDES;

const HTTP_PORT: u16 = 80;
const MAX_REQUEST_SIZE: usize = 1024;

#[embassy_executor::task]
pub async fn http_task(stack: Stack<'static>) {
    let mut rx_buf = [0u8; 1024];
    let mut tx_buf = [0u8; 1024];

    info!("HTTP endpoint starting (port={})", HTTP_PORT);

    loop {
        stack.wait_config_up().await;

        let mut socket = TcpSocket::new(stack, &mut rx_buf, &mut tx_buf);
        socket.set_timeout(Some(Duration::from_secs(10)));

        match socket.accept(HTTP_PORT).await {
            Ok(()) => {
                if let Err(err) = handle_connection(&mut socket).await {
                    warn!("HTTP connection error: {:?}", err);
                }
            }
            Err(err) => {
                warn!("HTTP accept error: {:?}", err);
                Timer::after(Duration::from_millis(200)).await;
            }
        }

        socket.abort();
    }
}

async fn handle_connection(socket: &mut TcpSocket<'_>) -> Result<(), embassy_net::tcp::Error> {
    let mut buf = [0u8; MAX_REQUEST_SIZE];
    let mut total = 0usize;

    // Read until the end of headers or the buffer is full.
    loop {
        let n = socket.read(&mut buf[total..]).await?;
        if n == 0 {
            if total == 0 {
                return Ok(());
            }
            break;
        }
        total += n;
        if total >= MAX_REQUEST_SIZE {
            break;
        }
        if buf[..total].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let request = match core::str::from_utf8(&buf[..total]) {
        Ok(s) => s,
        Err(_) => {
            return respond(socket, "400 Bad Request", r#"{"error":"not UTF-8"}"#).await;
        }
    };

    let request_line = request.lines().next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    let body = match request.find("\r\n\r\n") {
        Some(idx) => &request[idx + 4..],
        None => "",
    };

    match (method, path) {
        ("GET", "/health") => respond(socket, "200 OK", r#"{"ok":true}"#).await,
        ("POST", "/api/v1/override") => handle_override(socket, body).await,
        ("GET", _) => respond(socket, "404 Not Found", r#"{"error":"not found"}"#).await,
        _ => {
            respond(
                socket,
                "400 Bad Request",
                r#"{"error":"only GET and POST are supported"}"#,
            )
            .await
        }
    }
}

async fn handle_override(
    socket: &mut TcpSocket<'_>,
    body: &str,
) -> Result<(), embassy_net::tcp::Error> {
    let value = match parse_override_json(body) {
        Ok(v) => v,
        Err(msg) => {
            let mut out: String<128> = String::new();
            let _ = write!(out, r#"{{"error":"{}"}}"#, msg);
            return respond(socket, "400 Bad Request", out.as_str()).await;
        }
    };

    if !(READING_MIN as i16..=READING_MAX as i16).contains(&value) {
        let mut out: String<128> = String::new();
        let _ = write!(
            out,
            r#"{{"error":"value out of range","min":{},"max":{}}}"#,
            READING_MIN, READING_MAX
        );
        return respond(socket, "422 Unprocessable Entity", out.as_str()).await;
    }

    if OVERRIDES.try_send(value).is_err() {
        return respond(
            socket,
            "503 Service Unavailable",
            r#"{"error":"override queue full"}"#,
        )
        .await;
    }

    let mut out: String<64> = String::new();
    let _ = write!(out, r#"{{"ok":true,"value":{}}}"#, value);
    respond(socket, "200 OK", out.as_str()).await
}

/// Extract the `"value"` number field. Hand-written field scan; no JSON
/// dependency needed for one number.
fn parse_override_json(body: &str) -> Result<i16, &'static str> {
    let idx = body.find("\"value\"").ok_or("missing field value")?;
    let colon = body[idx..].find(':').ok_or("malformed value field")?;
    let value_str = body[idx + colon + 1..].trim_start();

    let mut end = 0usize;
    for (i, ch) in value_str.char_indices() {
        if ch == '-' && i == 0 {
            end = ch.len_utf8();
        } else if ch.is_ascii_digit() {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }

    value_str[..end]
        .parse::<i16>()
        .map_err(|_| "value must be an integer")
}

async fn respond(
    socket: &mut TcpSocket<'_>,
    status_line: &str,
    body: &str,
) -> Result<(), embassy_net::tcp::Error> {
    let mut head: String<192> = String::new();
    let _ = write!(
        head,
        "HTTP/1.1 {}\r\n\
         Content-Type: application/json; charset=utf-8\r\n\
         Connection: close\r\n\
         Content-Length: {}\r\n\
         \r\n",
        status_line,
        body.len()
    );
    socket.write(head.as_bytes()).await?;
    socket.write(body.as_bytes()).await?;
    socket.flush().await?;
    Ok(())
}
