use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const MAX_REQUEST_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    /// Every request gets the same status.
    Fixed(u16),
    /// The n-th request gets `statuses[n % len]`.
    Sequence(Vec<u16>),
    /// `/hop/N` redirects to `/hop/N+1` until `hops`, then answers 200.
    RedirectChain { hops: usize },
    /// Same status every time, serving any number of requests per connection.
    KeepAlive(u16),
    /// Announces a longer body than it sends, then closes the connection.
    TruncatedBody(u16),
}

impl Behavior {
    const fn keeps_alive(&self) -> bool {
        matches!(self, Behavior::KeepAlive(_))
    }
}

#[derive(Debug, Default)]
pub(crate) struct ServerStats {
    hits: AtomicUsize,
    connections: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ServerStats {
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Accepted TCP connections.
    pub(crate) fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Highest number of requests being served at the same time.
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub(crate) struct TestServer {
    url: String,
    stats: Arc<ServerStats>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TestServer {
    pub(crate) fn spawn(behavior: Behavior) -> Result<Self, String> {
        Self::spawn_with_delay(behavior, Duration::ZERO)
    }

    /// Each request is held for `delay` before the response is written.
    pub(crate) fn spawn_with_delay(behavior: Behavior, delay: Duration) -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let stats = Arc::new(ServerStats::default());
        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let behavior = Arc::new(behavior);
        let server_stats = Arc::clone(&stats);

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                match listener.accept() {
                    Ok((stream, _)) => {
                        let behavior = Arc::clone(&behavior);
                        let stats = Arc::clone(&server_stats);
                        thread::spawn(move || handle_client(stream, &behavior, delay, &stats));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            url: format!("http://{}", addr),
            stats,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn stats(&self) -> &ServerStats {
        &self.stats
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// A URL on a port nobody listens on.
pub(crate) fn unreachable_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(mut stream: TcpStream, behavior: &Behavior, delay: Duration, stats: &ServerStats) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    drop(stream.set_read_timeout(Some(Duration::from_secs(5))));
    stats.connections.fetch_add(1, Ordering::SeqCst);

    loop {
        let Some(path) = read_request_path(&mut stream) else {
            return;
        };

        let hit = stats.hits.fetch_add(1, Ordering::SeqCst);
        let active = stats.active.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        stats.peak.fetch_max(active, Ordering::SeqCst);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        stats.active.fetch_sub(1, Ordering::SeqCst);

        let response = response_for(behavior, hit, &path);
        if stream.write_all(response.as_bytes()).is_err() {
            return;
        }
        if stream.flush().is_err() {
            return;
        }
        if !behavior.keeps_alive() {
            break;
        }
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 || request.len() > MAX_REQUEST_BYTES {
            break;
        }
        request.extend_from_slice(buffer.get(..read)?);
    }
    let text = String::from_utf8_lossy(&request);
    let request_line = text.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_owned)
}

fn response_for(behavior: &Behavior, hit: usize, path: &str) -> String {
    match behavior {
        Behavior::Fixed(status) => plain_response(*status),
        Behavior::Sequence(statuses) => {
            let status = hit
                .checked_rem(statuses.len())
                .and_then(|idx| statuses.get(idx))
                .copied()
                .unwrap_or(200);
            plain_response(status)
        }
        Behavior::RedirectChain { hops } => {
            let hop = path
                .strip_prefix("/hop/")
                .and_then(|rest| rest.parse::<usize>().ok())
                .unwrap_or(0);
            if hop < *hops {
                redirect_response(&format!("/hop/{}", hop.saturating_add(1)))
            } else {
                plain_response(200)
            }
        }
        Behavior::KeepAlive(status) => format!(
            "HTTP/1.1 {} Test\r\nContent-Length: 2\r\n\r\nOK",
            status
        ),
        Behavior::TruncatedBody(status) => format!(
            "HTTP/1.1 {} Test\r\nContent-Length: 64\r\nConnection: close\r\n\r\nOK",
            status
        ),
    }
}

fn plain_response(status: u16) -> String {
    format!(
        "HTTP/1.1 {} Test\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status
    )
}

fn redirect_response(location: &str) -> String {
    format!(
        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        location
    )
}
