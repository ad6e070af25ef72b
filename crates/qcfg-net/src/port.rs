use std::fmt;
use std::net::{Ipv4Addr, TcpListener};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NetError, NetResult};

/// A TCP port number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(pub u16);

impl Port {
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(port)
    }
}

/// Accepts `"http"`, `"https"`, or a decimal number in `0..=65535`.
impl FromStr for Port {
    type Err = NetError;

    fn from_str(s: &str) -> NetResult<Self> {
        match s {
            "https" => return Ok(Self(443)),
            "http" => return Ok(Self(80)),
            _ => {}
        }
        let n: i64 = s.parse().map_err(|_| NetError::InvalidPort)?;
        u16::try_from(n)
            .map(Self)
            .map_err(|_| NetError::PortOutOfRange)
    }
}

/// Ask the kernel for a free port on the loopback interface.
///
/// The probe listener is closed before returning, so the port is only
/// likely, not guaranteed, to still be free when the caller binds it.
pub fn free_port() -> NetResult<Port> {
    let listener = TcpListener::bind("localhost:0")?;
    let port = Port(listener.local_addr()?.port());
    debug!(%port, "allocated free port");
    Ok(port)
}

/// Return `start + 1` if that port can be bound on `127.0.0.1`.
///
/// `start` must be a decimal in `1..=65534`; `""` and `"0"` are rejected as
/// an invalid starting port.
pub fn next_free_port(start: &str) -> NetResult<Port> {
    if start.is_empty() || start == "0" {
        return Err(NetError::InvalidStartingPort);
    }
    let start: i64 = start.parse().map_err(|_| NetError::StartOutOfRange)?;
    if start <= 0 || start >= 65535 {
        return Err(NetError::StartOutOfRange);
    }

    let next = (start + 1) as u16;
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, next))?;
    let port = Port(listener.local_addr()?.port());
    debug!(%port, "next port is free");
    Ok(port)
}
