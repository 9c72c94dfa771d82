use std::fmt;

/// TCP address the RPC server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    host: String,
    port: u16,
}

impl BindAddress {
    /// Builds a bind address from a host name (or IP literal) and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or IP literal to resolve.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port; `0` asks the operating system for an ephemeral port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "tcp://{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_hostname() {
        let address = BindAddress::new("localhost", 3478);
        assert_eq!(address.to_string(), "tcp://localhost:3478");
    }

    #[test]
    fn display_brackets_ipv6() {
        let address = BindAddress::new("::1", 9000);
        assert_eq!(address.to_string(), "tcp://[::1]:9000");
    }
}
