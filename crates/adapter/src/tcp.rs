//! TCP link between two emulator processes.
//!
//! Bridges the synchronous scheduler loop with an async tokio runtime: the
//! game side queues frames and polls received ones without ever blocking,
//! while background tasks own the socket.
//!
//! Frames flushed while no peer is connected are dropped, like radio traffic
//! with nobody listening.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::link::{
    encode_frame, FrameDecoder, InboundPacket, Link, FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD,
};
use crate::types::RecvId;

const CONNECT_ATTEMPTS: u32 = 50;
const CONNECT_RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(100);
/// Unflushed bytes kept before new frames are dropped.
const MAX_PENDING_BYTES: usize = 64 * (FRAME_HEADER_LEN + MAX_FRAME_PAYLOAD);

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid TETRIS_LINK_ROLE {0:?} (expected \"listen\" or \"connect\")")]
    InvalidRole(String),
    #[error("failed to start link runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    /// Wait for the peer to connect.
    Listen,
    /// Dial the peer.
    Connect,
}

impl LinkRole {
    pub fn parse(s: &str) -> Result<Self, LinkError> {
        if s.eq_ignore_ascii_case("listen") {
            Ok(LinkRole::Listen)
        } else if s.eq_ignore_ascii_case("connect") {
            Ok(LinkRole::Connect)
        } else {
            Err(LinkError::InvalidRole(s.to_string()))
        }
    }
}

/// Link configuration
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub addr: String,
    pub role: LinkRole,
    pub max_pending_frames: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:7878".to_string(),
            role: LinkRole::Listen,
            max_pending_frames: 64,
        }
    }
}

impl LinkConfig {
    /// Read `TETRIS_LINK_ADDR` / `TETRIS_LINK_ROLE`.
    ///
    /// Returns `Ok(None)` when no address is configured (offline badge).
    pub fn from_env() -> Result<Option<Self>, LinkError> {
        use std::env;

        let Some(addr) = env::var("TETRIS_LINK_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        else {
            return Ok(None);
        };

        let role = match env::var("TETRIS_LINK_ROLE") {
            Ok(s) => LinkRole::parse(s.trim())?,
            Err(_) => LinkRole::Listen,
        };

        Ok(Some(Self {
            addr,
            role,
            ..Self::default()
        }))
    }
}

/// Running link instance.
pub struct TcpLink {
    _rt: Runtime,
    in_rx: mpsc::Receiver<InboundPacket>,
    out_tx: mpsc::Sender<Vec<u8>>,
    connected: Arc<AtomicBool>,
    /// Encoded frames not yet handed to the writer task.
    pending: VecDeque<u8>,
}

impl TcpLink {
    pub fn start(config: LinkConfig) -> Result<Self, LinkError> {
        let capacity = config.max_pending_frames.max(1);
        let (in_tx, in_rx) = mpsc::channel::<InboundPacket>(capacity);
        let (out_tx, out_rx) = mpsc::channel::<Vec<u8>>(capacity);
        let connected = Arc::new(AtomicBool::new(false));

        let rt = Runtime::new()?;
        let flag = Arc::clone(&connected);
        rt.spawn(async move {
            if let Err(e) = run_link(config, in_tx, out_rx, &flag).await {
                tracing::warn!(error = %e, "peer link stopped");
            }
            flag.store(false, Ordering::Release);
        });

        Ok(Self {
            _rt: rt,
            in_rx,
            out_tx,
            connected,
            pending: VecDeque::new(),
        })
    }

    /// Whether a peer is currently attached.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl Link for TcpLink {
    fn send(&mut self, dest: RecvId, data: &[u8]) {
        let mut frame = Vec::with_capacity(data.len() + FRAME_HEADER_LEN);
        encode_frame(dest, data, &mut frame);
        if self.pending.len() + frame.len() > MAX_PENDING_BYTES {
            tracing::debug!(dest = dest.0, "outbound queue full, frame dropped");
            return;
        }
        self.pending.extend(frame);
    }

    fn flush(&mut self, budget: usize) {
        if !self.is_connected() {
            if !self.pending.is_empty() {
                tracing::debug!(bytes = self.pending.len(), "no peer, outbound bytes dropped");
                self.pending.clear();
            }
            return;
        }
        let n = budget.min(self.pending.len());
        if n == 0 {
            return;
        }
        let chunk: Vec<u8> = self.pending.drain(..n).collect();
        match self.out_tx.try_send(chunk) {
            Ok(()) => {}
            // Writer is behind: keep the bytes in order for the next flush.
            Err(mpsc::error::TrySendError::Full(chunk)) => {
                for byte in chunk.into_iter().rev() {
                    self.pending.push_front(byte);
                }
            }
            // Writer gone means the link is down; the bytes are lost, never retried.
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }

    fn poll(&mut self) -> Option<InboundPacket> {
        self.in_rx.try_recv().ok()
    }
}

async fn open_stream(config: &LinkConfig) -> std::io::Result<TcpStream> {
    match config.role {
        LinkRole::Listen => {
            let listener = TcpListener::bind(&config.addr).await?;
            tracing::info!(addr = %listener.local_addr()?, "waiting for peer");
            let (stream, peer) = listener.accept().await?;
            tracing::info!(%peer, "peer connected");
            Ok(stream)
        }
        LinkRole::Connect => {
            // The listening badge may start a moment later.
            let mut attempt = 0;
            loop {
                match TcpStream::connect(&config.addr).await {
                    Ok(stream) => {
                        tracing::info!(addr = %config.addr, "connected to peer");
                        return Ok(stream);
                    }
                    Err(e) if attempt < CONNECT_ATTEMPTS => {
                        tracing::debug!(error = %e, attempt, "peer not reachable yet");
                        attempt += 1;
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }
}

async fn run_link(
    config: LinkConfig,
    in_tx: mpsc::Sender<InboundPacket>,
    mut out_rx: mpsc::Receiver<Vec<u8>>,
    connected: &AtomicBool,
) -> std::io::Result<()> {
    let stream = open_stream(&config).await?;
    stream.set_nodelay(true)?;
    // Nothing sent before the peer arrived may reach it.
    while out_rx.try_recv().is_ok() {}
    connected.store(true, Ordering::Release);
    let (mut reader, mut writer) = stream.into_split();

    let write_task = tokio::spawn(async move {
        while let Some(chunk) = out_rx.recv().await {
            if writer.write_all(&chunk).await.is_err() {
                break;
            }
        }
    });

    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 256];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            tracing::warn!("peer closed the link");
            break;
        }
        decoder.push(&buf[..n]);
        while let Some(frame) = decoder.next_frame() {
            // A full inbox drops the frame, like a busy badge would.
            if in_tx.try_send(frame).is_err() {
                tracing::debug!("inbound queue full, frame dropped");
            }
        }
    }

    connected.store(false, Ordering::Release);
    write_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconnected_flush_drops_pending() {
        let mut link = TcpLink::start(LinkConfig {
            addr: "127.0.0.1:0".to_string(),
            ..LinkConfig::default()
        })
        .unwrap();
        link.send(RecvId(3), &[0x04]);
        assert_eq!(link.pending.len(), 3);
        link.flush(usize::MAX);
        assert!(!link.is_connected());
        assert!(link.pending.is_empty());
    }

    #[test]
    fn test_send_drops_frames_past_queue_limit() {
        let mut link = TcpLink::start(LinkConfig {
            addr: "127.0.0.1:0".to_string(),
            ..LinkConfig::default()
        })
        .unwrap();
        for _ in 0..MAX_PENDING_BYTES {
            link.send(RecvId(3), &[0x02, 1]);
        }
        assert!(link.pending.len() <= MAX_PENDING_BYTES);
        assert_eq!(link.pending.len() % 4, 0);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(LinkRole::parse("listen").unwrap(), LinkRole::Listen);
        assert_eq!(LinkRole::parse("CONNECT").unwrap(), LinkRole::Connect);
        assert!(matches!(
            LinkRole::parse("serve"),
            Err(LinkError::InvalidRole(_))
        ));
    }
}
