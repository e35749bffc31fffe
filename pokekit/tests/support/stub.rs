//! A minimal HTTP/1.1 server answering canned responses.
//!
//! Occurrences of `{base}` in a response body are replaced with the base URL
//! of the stub, so responses can link back to it.
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
}

pub fn route(method: &'static str, path: &str, status: u16, body: impl ToString) -> Route {
    Route {
        method,
        path: path.to_owned(),
        status,
        body: body.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct Stub {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Stub {
    pub async fn serve(routes: impl IntoIterator<Item = Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let routes: Arc<[Route]> = routes.into_iter().collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();

        let _ = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = log.clone();

                let _ = tokio::spawn(async move {
                    let _ = respond(stream, address, &routes, &log).await;
                });
            }
        });

        Self { address, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

/// An address where nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}")
}

async fn respond(
    mut stream: TcpStream,
    address: SocketAddr,
    routes: &[Route],
    log: &Mutex<Vec<Request>>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0; 4096];

    let head_end = loop {
        let read = stream.read(&mut chunk).await?;

        if read == 0 {
            return Ok(());
        }

        buffer.extend_from_slice(&chunk[..read]);

        if let Some(end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break end + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();

    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < head_end + content_length {
        let read = stream.read(&mut chunk).await?;

        if read == 0 {
            break;
        }

        buffer.extend_from_slice(&chunk[..read]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let path = request_line.next().unwrap_or_default().to_owned();
    let body = String::from_utf8_lossy(&buffer[head_end..]).into_owned();

    let (status, response) = routes
        .iter()
        .find(|route| route.method == method && route.path == path)
        .map(|route| {
            (
                route.status,
                route.body.replace("{base}", &format!("http://{address}")),
            )
        })
        .unwrap_or((404, "{}".to_owned()));

    log.lock().unwrap().push(Request { method, path, body });

    let reply = format!(
        "HTTP/1.1 {status} Stub\r\n\
         content-type: application/json\r\n\
         content-length: {length}\r\n\
         connection: close\r\n\r\n\
         {response}",
        length = response.len(),
    );

    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}
