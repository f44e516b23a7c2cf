//! Server configuration.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_VIDEOS_DIR: &str = "videos";
pub const DEFAULT_SEND_BUFFER: usize = 64;

/// Process-wide settings, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    pub port: u16,
    /// Directory served under `/videos` and listed as the catalog
    pub videos_dir: PathBuf,
    /// Outbound queue capacity per connection
    pub send_buffer: usize,
    /// Log the public IPv4/IPv6 endpoints after startup
    pub announce_public_ip: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Send buffer capacity, never zero.
    pub fn send_buffer_capacity(&self) -> usize {
        self.send_buffer.max(1)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            videos_dir: PathBuf::from(DEFAULT_VIDEOS_DIR),
            send_buffer: DEFAULT_SEND_BUFFER,
            announce_public_ip: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_formats_ipv4_and_ipv6() {
        // テスト項目: IPv6 アドレスは角括弧で囲まれる
        // given (前提条件):
        let ipv4 = ServerConfig::default();
        let ipv6 = ServerConfig {
            host: "::".to_string(),
            ..ServerConfig::default()
        };

        // when (操作) / then (期待する結果):
        assert_eq!(ipv4.bind_addr(), "0.0.0.0:3000");
        assert_eq!(ipv6.bind_addr(), "[::]:3000");
    }

    #[test]
    fn test_send_buffer_capacity_is_never_zero() {
        // テスト項目: 送信バッファ容量 0 は 1 に補正される
        // given (前提条件):
        let config = ServerConfig {
            send_buffer: 0,
            ..ServerConfig::default()
        };

        // when (操作) / then (期待する結果):
        assert_eq!(config.send_buffer_capacity(), 1);
    }
}
