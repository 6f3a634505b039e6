use super::TileCoord;
use crate::{prelude::HashSet, MapError, Result};
use reqwest::blocking::Client;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

const USER_AGENT: &str = concat!("rocketmap/", env!("CARGO_PKG_VERSION"));
const MAX_ATTEMPTS: usize = 2;
const RETRY_DELAY: Duration = Duration::from_millis(100);

type Download = (TileCoord, std::result::Result<Vec<u8>, String>);

/// Fetches tiles on detached threads and hands the bytes back through a
/// channel drained by [`TileLoader::drain`].
///
/// A tile is requested at most once while in flight. Tiles that fail every
/// attempt are not requested again.
pub struct TileLoader {
    client: Client,
    tx: Sender<Download>,
    rx: Receiver<Download>,
    pending: HashSet<TileCoord>,
    failed: HashSet<TileCoord>,
}

impl TileLoader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MapError::Network(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Uses a preconfigured HTTP client (proxies, timeouts, headers)
    pub fn with_client(client: Client) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            tx,
            rx,
            pending: HashSet::default(),
            failed: HashSet::default(),
        }
    }

    /// Starts downloading `url` for `coord`. Returns false when the tile is
    /// already in flight or has failed before.
    pub fn request(&mut self, coord: TileCoord, url: String) -> bool {
        if self.pending.contains(&coord) || self.failed.contains(&coord) {
            return false;
        }
        self.pending.insert(coord);

        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch_with_retry(&client, &url, coord);
            let _ = tx.send((coord, result));
        });
        true
    }

    /// Tiles that finished downloading since the last call
    pub fn drain(&mut self) -> Vec<(TileCoord, Vec<u8>)> {
        let mut done = Vec::new();
        while let Ok((coord, result)) = self.rx.try_recv() {
            self.pending.remove(&coord);
            match result {
                Ok(bytes) => done.push((coord, bytes)),
                Err(e) => {
                    log::error!("giving up on tile {coord:?}: {e}");
                    self.failed.insert(coord);
                }
            }
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn has_failed(&self, coord: &TileCoord) -> bool {
        self.failed.contains(coord)
    }
}

fn fetch_with_retry(
    client: &Client,
    url: &str,
    coord: TileCoord,
) -> std::result::Result<Vec<u8>, String> {
    let mut last_error = String::new();
    for attempt in 1..=MAX_ATTEMPTS {
        log::debug!("fetch tile {coord:?} attempt {attempt}");
        match fetch(client, url) {
            Ok(bytes) => {
                log::debug!("downloaded tile {coord:?} ({} bytes)", bytes.len());
                return Ok(bytes);
            }
            Err(e) => {
                log::warn!("tile {coord:?} download failed on attempt {attempt}: {e}");
                last_error = e;
                if attempt < MAX_ATTEMPTS {
                    thread::sleep(RETRY_DELAY);
                }
            }
        }
    }
    Err(last_error)
}

fn fetch(client: &Client, url: &str) -> std::result::Result<Vec<u8>, String> {
    let response = client.get(url).send().map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    let bytes = response.bytes().map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        time::Instant,
    };

    /// Answers `connections` requests with `status` and `body`, then stops
    fn serve(connections: usize, status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let head = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                stream.write_all(head.as_bytes()).unwrap();
                stream.write_all(body).unwrap();
            }
        });
        format!("http://{addr}")
    }

    fn loader() -> TileLoader {
        TileLoader::with_client(Client::builder().no_proxy().build().unwrap())
    }

    fn drain_until_idle(loader: &mut TileLoader) -> Vec<(TileCoord, Vec<u8>)> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut done = Vec::new();
        while loader.in_flight() > 0 && Instant::now() < deadline {
            done.extend(loader.drain());
            thread::sleep(Duration::from_millis(10));
        }
        done
    }

    #[test]
    fn test_downloads_tile_bytes() {
        let base = serve(1, "200 OK", b"tile");
        let mut loader = loader();
        let coord = TileCoord::new(1, 2, 3);

        assert!(loader.request(coord, format!("{base}/3/1/2.png")));
        assert!(!loader.request(coord, format!("{base}/3/1/2.png")));

        let done = drain_until_idle(&mut loader);
        assert_eq!(done, vec![(coord, b"tile".to_vec())]);
        assert!(!loader.has_failed(&coord));
    }

    #[test]
    fn test_failed_tile_is_not_retried() {
        let base = serve(MAX_ATTEMPTS, "404 Not Found", b"");
        let mut loader = loader();
        let coord = TileCoord::new(0, 0, 0);

        assert!(loader.request(coord, format!("{base}/0/0/0.png")));
        assert!(drain_until_idle(&mut loader).is_empty());

        assert!(loader.has_failed(&coord));
        assert!(!loader.request(coord, format!("{base}/0/0/0.png")));
    }
}
