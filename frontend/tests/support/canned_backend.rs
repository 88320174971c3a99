//! Loopback HTTP server replaying canned backend responses.
//!
//! Each connection carries one request. Responses are matched on
//! `"{METHOD} {path}"`; anything unmatched gets a 404 with a JSON message.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

type Routes = Arc<HashMap<String, (u16, String)>>;

/// Request as received by the canned backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// `"{METHOD} {path}"`.
    pub route: String,
    /// Parsed JSON body, `Value::Null` when empty.
    pub body: Value,
}

/// Builder collecting the canned routes.
#[derive(Default)]
pub struct CannedRoutes(HashMap<String, (u16, String)>);

impl CannedRoutes {
    /// Answer `route` (for example `"GET /api/medicamentos"`) with `status`
    /// and `body`.
    pub fn with(mut self, route: &str, status: u16, body: &Value) -> Self {
        self.0.insert(route.to_owned(), (status, body.to_string()));
        self
    }
}

/// Running canned backend.
pub struct CannedBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl CannedBackend {
    /// Bind an ephemeral port on the loopback interface and start serving.
    pub async fn start(routes: CannedRoutes) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let routes: Routes = Arc::new(routes.0);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Err(error) = serve(stream, &routes, &recorded).await {
                        eprintln!("canned backend connection failed: {error}");
                    }
                });
            }
        });
        Self {
            addr,
            requests,
            task,
        }
    }

    /// Base URL for the backend client.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("loopback url")
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Routes received so far, in arrival order.
    pub fn routes(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.route)
            .collect()
    }
}

impl Drop for CannedBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    stream: TcpStream,
    routes: &Routes,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let mut content_length = 0_usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body).await?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let route = format!("{method} {path}");
    recorded.lock().expect("requests lock").push(RecordedRequest {
        route: route.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, payload) = routes
        .get(&route)
        .cloned()
        .unwrap_or_else(|| (404, r#"{"mensagem":"rota desconhecida"}"#.to_owned()));
    let response = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
