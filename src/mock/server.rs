use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};

/// Simulated inference latency applied before every response.
pub const INFERENCE_DELAY: Duration = Duration::from_millis(50);

/// The one and only response body, byte for byte.
pub const MOCK_RESPONSE_BODY: &str = r#"{"response": "This is a mock LLM response."}"#;

/// Address the standalone binary listens on.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_as_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

struct MockServerState {
    recordings: Mutex<Vec<RecordedRequest>>,
}

impl MockServerState {
    async fn record_request(&self, record: RecordedRequest) {
        let mut recordings = self.recordings.lock().await;
        recordings.push(record);
    }

    async fn recordings(&self) -> Vec<RecordedRequest> {
        let recordings = self.recordings.lock().await;
        recordings.clone()
    }
}

/// Stateless stand-in for an LLM completion endpoint.
///
/// Any method on any path gets status 200 and [`MOCK_RESPONSE_BODY`]
/// after [`INFERENCE_DELAY`] elapses. Request bodies are read fully,
/// printed for diagnostics, and recorded in-memory for assertions.
pub struct MockLLMServer {
    addr: SocketAddr,
    state: Arc<MockServerState>,
    shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    join_handle: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl MockLLMServer {
    pub async fn start(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockServerState {
            recordings: Mutex::new(Vec::new()),
        });

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let shutdown_tx = Arc::new(Mutex::new(Some(shutdown_tx)));
        let join_handle_slot = Arc::new(Mutex::new(None));

        let state_clone = state.clone();
        let join_handle = tokio::spawn(async move {
            run_server(listener, state_clone, shutdown_rx).await;
        });

        {
            let mut handle_slot = join_handle_slot.lock().await;
            *handle_slot = Some(join_handle);
        }

        Ok(Self {
            addr,
            state,
            shutdown_tx,
            join_handle: join_handle_slot,
        })
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.join_handle.lock().await.take() {
            let _ = handle.await;
        }
    }

    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.state.recordings().await
    }
}

impl Drop for MockLLMServer {
    fn drop(&mut self) {
        if let Ok(mut tx_opt) = self.shutdown_tx.try_lock() {
            if let Some(tx) = tx_opt.take() {
                let _ = tx.send(());
            }
        }

        if let Ok(mut handle_opt) = self.join_handle.try_lock() {
            if let Some(handle) = handle_opt.take() {
                handle.abort();
            }
        }
    }
}

async fn run_server(
    listener: TcpListener,
    state: Arc<MockServerState>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => {
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        let state_clone = state.clone();
                        tokio::spawn(async move {
                            let _ = handle_connection(stream, state_clone).await;
                        });
                    }
                    Err(err) => {
                        eprintln!("mock llm accept error: {}", err);
                        break;
                    }
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    state: Arc<MockServerState>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut temp = [0u8; 1024];
    let mut header_end: Option<usize> = None;
    let mut method = String::new();
    let mut path = String::new();
    let mut headers = HashMap::new();
    let mut content_length = 0usize;

    loop {
        let n = stream.read(&mut temp).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);

        if header_end.is_none() {
            if let Some(end) = find_header_end(&buffer) {
                header_end = Some(end);
                let head = parse_request_head(&buffer[..end])?;
                method = head.method;
                path = head.path;
                headers = head.headers;
                content_length = head.content_length;
            }
        }

        if let Some(end) = header_end {
            if buffer.len() >= end + content_length {
                break;
            }
        }
    }

    // Malformed head or early disconnect: a transport concern, drop it.
    let header_end = match header_end {
        Some(end) => end,
        None => return Ok(()),
    };

    let body = if buffer.len() >= header_end + content_length {
        buffer[header_end..header_end + content_length].to_vec()
    } else {
        Vec::new()
    };

    // Best-effort diagnostic echo of whatever the client sent.
    println!(
        "mock llm received {} {} ({} byte body): {}",
        method,
        path,
        body.len(),
        String::from_utf8_lossy(&body)
    );

    state
        .record_request(RecordedRequest {
            method,
            path,
            headers,
            body,
        })
        .await;

    tokio::time::sleep(INFERENCE_DELAY).await;

    send_mock_response(&mut stream).await
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

struct ParsedHead {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    content_length: usize,
}

fn parse_request_head(buffer: &[u8]) -> std::io::Result<ParsedHead> {
    let head = String::from_utf8_lossy(buffer);
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    let mut content_length = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let key = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if key == "content-length" {
                content_length = value.parse().unwrap_or(0);
            }
            headers.insert(key, value);
        }
    }

    Ok(ParsedHead {
        method,
        path,
        headers,
        content_length,
    })
}

async fn send_mock_response(stream: &mut TcpStream) -> std::io::Result<()> {
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        MOCK_RESPONSE_BODY.len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(MOCK_RESPONSE_BODY.as_bytes()).await
}
