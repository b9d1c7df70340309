use std::{
    io::ErrorKind,
    net::{Ipv4Addr, SocketAddr, UdpSocket},
};

use anyhow::{Context, Result};
use hal::{AccelSource, RawAccel, SourceStats};
use log::{debug, info, warn};

/// Must match the destination port used by the frame generator on the board
pub const DEFAULT_PORT: u16 = 4096;

/// Must match the destination address used by the frame generator on the board
pub const DEFAULT_ADDRESS: Ipv4Addr = Ipv4Addr::new(10, 10, 10, 1);

// Only the first six bytes are read, longer datagrams are truncated here.
const RECV_BUFFER_SIZE: usize = 1024;

/// Non-blocking UDP receiver that keeps only the newest accelerometer sample
pub struct UdpLink {
    socket: UdpSocket,
    latest: Option<RawAccel>,
    last_sender: Option<SocketAddr>,
    stats: SourceStats,
    buf: [u8; RECV_BUFFER_SIZE],
}

impl UdpLink {
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .with_context(|| format!("Failed to bind UDP socket to {}", addr))?;
        socket
            .set_nonblocking(true)
            .context("Failed to make UDP socket non-blocking")?;

        Ok(Self {
            socket,
            latest: None,
            last_sender: None,
            stats: SourceStats::default(),
            buf: [0; RECV_BUFFER_SIZE],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Drain every datagram queued on the socket
    ///
    /// Returns once the socket would block. The last valid datagram wins.
    pub fn poll(&mut self) -> Result<()> {
        loop {
            let (len, addr) = match self.socket.recv_from(&mut self.buf) {
                Ok(ok) => ok,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Failed to receive datagram"),
            };

            match RawAccel::parse(&self.buf[..len]) {
                Some(raw) => {
                    if self.last_sender != Some(addr) {
                        info!("Receiving samples from {}", addr);
                    }
                    self.latest = Some(raw);
                    self.last_sender = Some(addr);
                    self.stats.received += 1;
                }
                None => {
                    self.stats.dropped += 1;
                    debug!("Dropped {}-byte datagram from {}", len, addr);
                }
            }
        }
    }
}

impl AccelSource for UdpLink {
    fn latest(&mut self) -> Option<RawAccel> {
        if let Err(e) = self.poll() {
            warn!("Error while reading samples: {:?}", e);
        }
        self.latest
    }

    fn stats(&self) -> SourceStats {
        self.stats
    }
}
