use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use memchr::{memchr, memmem::Finder};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use scout_api::limits::{enforce_max_response_size, MAX_RESPONSE_BYTES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    InvalidMessage,
    Connection,
    Timeout,
    Io,
}

pub trait IoStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> IoStream for T {}
pub type DynStream = Pin<Box<dyn IoStream>>;

pub type ConnectorFn = dyn Fn(
        &str,
        u16,
    ) -> Pin<Box<dyn Future<Output = Result<DynStream, ClientError>> + Send>>
    + Send
    + Sync;

/// HTTP client for the search endpoint with a pluggable connector, so
/// tests can substitute an in-memory stream (e.g. via `tokio::io::duplex`)
/// for a TCP connection.
#[derive(Clone)]
pub struct SearchClient {
    connector: Arc<ConnectorFn>,
    pub req_timeout: Duration,
    pub header_read_chunk: usize,
}

impl SearchClient {
    pub fn new_with_connector(connector: Arc<ConnectorFn>) -> Self {
        Self {
            connector,
            req_timeout: Duration::from_secs(5),
            header_read_chunk: 2048,
        }
    }

    /// Client dialing plain TCP; the endpoint scheme must be `http`.
    pub fn new_tcp() -> Self {
        let connector: Arc<ConnectorFn> = Arc::new(|host: &str, port: u16| {
            let host = host.to_string();
            Box::pin(async move {
                let stream = TcpStream::connect((host.as_str(), port))
                    .await
                    .map_err(|_| ClientError::Connection)?;
                Ok(Box::pin(stream) as DynStream)
            })
        });
        Self::new_with_connector(connector)
    }

    /// Create a client that does not perform network I/O (for tests),
    /// expecting the provided connector to hand out streams.
    pub fn new_test(connector: Arc<ConnectorFn>) -> Self {
        Self::new_with_connector(connector)
    }

    /// Issues a single `POST` with a JSON body and reads the full
    /// response. Every I/O step is bounded by `req_timeout`.
    pub async fn post_json(
        &self,
        endpoint: &str,
        body: &[u8],
    ) -> Result<ClientResponse, ClientError> {
        let parsed = url::Url::parse(endpoint).map_err(|_| ClientError::InvalidMessage)?;
        if parsed.scheme() != "http" {
            return Err(ClientError::InvalidMessage);
        }
        let host = parsed.host_str().ok_or(ClientError::InvalidMessage)?.to_string();
        let port = parsed.port_or_known_default().unwrap_or(80);
        let path = match parsed.query() {
            Some(q) => format!("{}?{}", parsed.path(), q),
            None => parsed.path().to_string(),
        };

        let fut = (self.connector)(&host, port);
        let mut stream = timeout(self.req_timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout)??;

        let head = format!(
            "POST {} HTTP/1.1\r\nhost: {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            path,
            host,
            body.len()
        );
        timeout(self.req_timeout, stream.write_all(head.as_bytes()))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|_| ClientError::Io)?;
        timeout(self.req_timeout, stream.write_all(body))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|_| ClientError::Io)?;
        timeout(self.req_timeout, stream.flush())
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|_| ClientError::Io)?;

        timeout(
            self.req_timeout,
            read_response(&mut stream, self.header_read_chunk),
        )
        .await
        .map_err(|_| ClientError::Timeout)?
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

async fn read_response(
    stream: &mut DynStream,
    chunk: usize,
) -> Result<ClientResponse, ClientError> {
    // Read headers up to CRLFCRLF with the total cap enforced; only scan
    // the newly appended region (with overlap for boundary cases).
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut tmp = vec![0u8; chunk.max(1)];
    let finder = Finder::new(b"\r\n\r\n");
    let mut search_from: usize = 0;
    let header_end = loop {
        let n = stream.read(&mut tmp).await.map_err(|_| ClientError::Io)?;
        if n == 0 {
            return Err(ClientError::Connection);
        }
        let before_len = buf.len();
        buf.extend_from_slice(&tmp[..n]);
        if buf.len() > MAX_RESPONSE_BYTES {
            return Err(ClientError::Io);
        }
        let start = search_from.saturating_sub(3);
        if let Some(rel) = finder.find(&buf[start..]) {
            break start + rel;
        }
        search_from = before_len + n;
    };

    let (head, rest) = buf.split_at(header_end + 4);
    let head_str = std::str::from_utf8(head).map_err(|_| ClientError::InvalidMessage)?;
    let mut lines = head_str.split("\r\n");
    let status = lines.next().unwrap_or("");
    let mut sp = status.split_whitespace();
    let proto = sp.next().unwrap_or("");
    if !proto.starts_with("HTTP/") {
        return Err(ClientError::InvalidMessage);
    }
    let code = sp
        .next()
        .and_then(|c| c.parse::<u16>().ok())
        .ok_or(ClientError::InvalidMessage)?;

    let mut headers: Vec<(String, String)> = Vec::new();
    let mut content_length: usize = 0;
    for line in lines {
        if line.is_empty() {
            continue;
        }
        if let Some(idx) = memchr(b':', line.as_bytes()) {
            let (name_raw, value_raw) = line.split_at(idx);
            let name = name_raw.trim().to_ascii_lowercase();
            let value = value_raw[1..].trim().to_string();
            if name == "content-length" {
                if let Ok(n) = value.parse::<usize>() {
                    content_length = n;
                }
            }
            headers.push((name, value));
        }
    }

    let mut body = Vec::new();
    if content_length > 0 {
        enforce_max_response_size(header_end + 4 + content_length)
            .map_err(|_| ClientError::Io)?;
        if !rest.is_empty() {
            body.extend_from_slice(rest);
        }
        while body.len() < content_length {
            let mut chunk = [0u8; 4096];
            let n = stream.read(&mut chunk).await.map_err(|_| ClientError::Io)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
            if header_end + 4 + body.len() > MAX_RESPONSE_BYTES {
                return Err(ClientError::Io);
            }
        }
        body.truncate(content_length);
    }

    Ok(ClientResponse {
        code,
        headers,
        body,
    })
}
