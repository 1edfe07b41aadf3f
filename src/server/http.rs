//! 最小化的 HTTP/1.1 请求解析与响应编码
//!
//! 只处理请求行，忽略请求头与请求体；每个连接只服务一个请求。

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{DashError, Result};

/// 请求头最大长度
pub const MAX_HEAD_SIZE: usize = 8192;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// 去掉查询参数后的路径
    pub path: String,
}

/// 读取直到请求头结束
pub async fn read_request_head<R: AsyncRead + Unpin>(reader: &mut R) -> Result<BytesMut> {
    let mut buf = BytesMut::with_capacity(1024);

    loop {
        if let Some(pos) = find_terminator(&buf) {
            buf.truncate(pos);
            return Ok(buf);
        }
        if buf.len() > MAX_HEAD_SIZE {
            return Err(DashError::RequestTooLarge {
                size: buf.len(),
                max: MAX_HEAD_SIZE,
            });
        }

        let n = reader.read_buf(&mut buf).await?;
        if n == 0 {
            return Err(DashError::Http(
                "connection closed before end of request head".to_string(),
            ));
        }
    }
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// 解析请求行，例如 `GET /?x=1 HTTP/1.1`
pub fn parse_request_head(head: &[u8]) -> Result<Request> {
    let head = std::str::from_utf8(head)
        .map_err(|_| DashError::Http("request head is not valid UTF-8".to_string()))?;
    let request_line = head.lines().next().unwrap_or_default();

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(DashError::Http(format!("malformed request line: {:?}", request_line)));
    };
    if parts.next().is_some() || !version.starts_with("HTTP/1.") {
        return Err(DashError::Http(format!("malformed request line: {:?}", request_line)));
    }
    if !target.starts_with('/') {
        return Err(DashError::Http(format!("unsupported request target: {}", target)));
    }

    let method = match method {
        "GET" => Method::Get,
        "HEAD" => Method::Head,
        _ => Method::Other,
    };
    let path = target.split('?').next().unwrap_or(target).to_string();

    Ok(Request { method, path })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub reason: &'static str,
}

impl Status {
    pub const OK: Status = Status { code: 200, reason: "OK" };
    pub const BAD_REQUEST: Status = Status { code: 400, reason: "Bad Request" };
    pub const NOT_FOUND: Status = Status { code: 404, reason: "Not Found" };
    pub const METHOD_NOT_ALLOWED: Status = Status { code: 405, reason: "Method Not Allowed" };
    pub const INTERNAL_SERVER_ERROR: Status = Status {
        code: 500,
        reason: "Internal Server Error",
    };
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    content_type: &'static str,
    extra_headers: Vec<(&'static str, String)>,
    body: Bytes,
}

impl Response {
    pub fn html(body: String) -> Self {
        Self {
            status: Status::OK,
            content_type: "text/html; charset=utf-8",
            extra_headers: Vec::new(),
            body: Bytes::from(body),
        }
    }

    pub fn text(status: Status, message: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            extra_headers: Vec::new(),
            body: Bytes::from(format!("{}\n", message)),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extra_headers.push((name, value.into()));
        self
    }

    /// 编码为字节；HEAD 请求不带响应体，但 Content-Length 保持不变
    pub fn encode(&self, include_body: bool) -> BytesMut {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
            self.status.code,
            self.status.reason,
            self.content_type,
            self.body.len()
        );
        for (name, value) in &self.extra_headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut buf = BytesMut::with_capacity(head.len() + self.body.len());
        buf.put_slice(head.as_bytes());
        if include_body {
            buf.put_slice(&self.body);
        }
        buf
    }
}
