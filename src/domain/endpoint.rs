use std::fmt;

/// Address of a gpsd instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Endpoint { host: host.into(), port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Deterministic, collision-free key suitable as a file name.
    ///
    /// Everything outside `[A-Za-z0-9.-]` in the host is percent-escaped, `_` and `%` included, so the
    /// `_` joining host and port is unambiguous and two distinct endpoints never share a key.
    pub fn store_key(&self) -> String {
        let mut key = String::with_capacity(self.host.len() + 6);
        for byte in self.host.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => key.push(byte as char),
                _ => key.push_str(&format!("%{:02X}", byte)),
            }
        }
        key.push('_');
        key.push_str(&self.port.to_string());
        key
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
