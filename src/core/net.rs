// src/core/net.rs

// Blocking HTTP GET. One request at a time, no retries.

use std::sync::Arc;

use thiserror::Error;

use crate::config::options::ClientOptions;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    /// The server answered, but not with 2xx.
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    /// No usable response (DNS, connect, TLS, timeout, body read).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

impl NetError {
    pub fn status(&self) -> Option<u16> {
        match self {
            NetError::Status { code, .. } => Some(*code),
            NetError::Transport { .. } => None,
        }
    }
}

/// The single seam between the clients and the network.
/// `query` pairs are appended to `url` (percent-encoded by the implementation).
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, NetError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, NetError> {
        (**self).get(url, query)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, NetError> {
        (**self).get(url, query)
    }
}

/// `ureq`-backed transport used by default.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(opts: &ClientOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_read(opts.timeout)
            .timeout_write(opts.timeout)
            .user_agent(&opts.user_agent)
            .build();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&ClientOptions::default())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, NetError> {
        let mut req = self.agent.get(url);
        for (k, v) in query {
            req = req.query(k, v);
        }

        match req.call() {
            Ok(resp) => resp.into_string().map_err(|e| NetError::Transport {
                url: s!(url),
                reason: e.to_string(),
            }),
            Err(ureq::Error::Status(code, _)) => Err(NetError::Status { code, url: s!(url) }),
            Err(e) => Err(NetError::Transport { url: s!(url), reason: e.to_string() }),
        }
    }
}

/// Human-readable form of a request, for logs.
pub fn describe(url: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return s!(url);
    }
    let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", url, qs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_appends_query() {
        assert_eq!(describe("http://x/latest", &[]), "http://x/latest");
        assert_eq!(
            describe("http://x/timeseries", &query!["id" => 4151, "timestep" => "5m"]),
            "http://x/timeseries?id=4151&timestep=5m"
        );
    }

    #[test]
    fn only_status_errors_carry_a_code() {
        let s = NetError::Status { code: 404, url: s!("u") };
        let t = NetError::Transport { url: s!("u"), reason: s!("timed out") };
        assert_eq!(s.status(), Some(404));
        assert_eq!(t.status(), None);
    }
}
