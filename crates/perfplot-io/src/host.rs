//! Host identity lookup.
//!
//! The hostname comes from the `hostname` command and the IP from resolving
//! that name. Either half falls back to a fixed placeholder on failure.

use perfplot_core::types::{HostIdentity, UNKNOWN_HOST_IP};
use std::net::{IpAddr, ToSocketAddrs};
use std::process;

/// Look up this machine's identity. Never fails.
pub fn resolve_host() -> HostIdentity {
    match hostname() {
        Some(name) => {
            let ip = resolve_ip(&name)
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| UNKNOWN_HOST_IP.to_string());
            HostIdentity::new(name, ip)
        }
        None => {
            tracing::warn!("hostname lookup failed");
            HostIdentity::unresolved()
        }
    }
}

/// Get machine hostname via the `hostname` command.
fn hostname() -> Option<String> {
    process::Command::new("hostname")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First address `name` resolves to, preferring IPv4.
pub fn resolve_ip(name: &str) -> Option<IpAddr> {
    let addrs: Vec<IpAddr> = (name, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .collect();
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
