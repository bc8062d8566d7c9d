//! TCP transport.

use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// TCP listener producing connected streams for the framing layers above.
///
/// Accepted and connected streams have Nagle's algorithm disabled; the
/// framing layer already writes whole messages.
pub struct TcpTransport {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TcpTransport {
    /// Bind and listen on `addr`.
    pub fn bind(addr: impl ToSocketAddrs + std::fmt::Debug) -> Result<Self> {
        let listener = TcpListener::bind(&addr).map_err(|e| TransportError::Bind {
            addr: format!("{addr:?}"),
            source: e,
        })?;
        let local_addr = listener.local_addr()?;
        info!(%local_addr, "listening on tcp");
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Accept one incoming connection (blocking).
    pub fn accept(&self) -> Result<TcpStream> {
        let (stream, peer_addr) = self.listener.accept().map_err(TransportError::Accept)?;
        stream.set_nodelay(true)?;
        debug!(%peer_addr, "accepted tcp connection");
        Ok(stream)
    }

    /// Connect to a listening peer (blocking).
    pub fn connect(addr: impl ToSocketAddrs + std::fmt::Debug) -> Result<TcpStream> {
        let stream = TcpStream::connect(&addr).map_err(|e| TransportError::Connect {
            addr: format!("{addr:?}"),
            source: e,
        })?;
        stream.set_nodelay(true)?;
        debug!(local = ?stream.local_addr().ok(), "connected to tcp peer");
        Ok(stream)
    }

    /// The address this transport is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[test]
    fn bind_accept_connect() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        let addr = transport.local_addr();

        let client = std::thread::spawn(move || {
            let mut stream = TcpTransport::connect(addr).unwrap();
            stream.write_all(b"hello").unwrap();
        });

        let mut server = transport.accept().unwrap();
        let mut buf = [0u8; 5];
        server.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");

        client.join().unwrap();
    }

    #[test]
    fn connect_refused_maps_to_connect_error() {
        // Bind then drop to get a port that is very likely closed.
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        let addr = transport.local_addr();
        drop(transport);

        let result = TcpTransport::connect(addr);
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[test]
    fn nodelay_applied() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        let addr = transport.local_addr();

        let client = std::thread::spawn(move || TcpTransport::connect(addr).unwrap());
        let server = transport.accept().unwrap();
        let client_stream = client.join().unwrap();

        assert!(server.nodelay().unwrap());
        assert!(client_stream.nodelay().unwrap());
    }
}
