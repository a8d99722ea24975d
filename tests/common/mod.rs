// tests/common/mod.rs
//
// Scripted transport: canned replies keyed by exact URL, every call recorded.
//
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use osrs_utils::config::consts::{GRAPH_ENDPOINT, PRICES_ENDPOINT};
use osrs_utils::core::net::{NetError, Transport};

pub enum Reply {
    Body(String),
    Status(u16),
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ok(&self, url: impl Into<String>, body: impl Into<String>) -> &Self {
        self.replies.lock().unwrap().push((url.into(), Reply::Body(body.into())));
        self
    }

    pub fn status(&self, url: impl Into<String>, code: u16) -> &Self {
        self.replies.lock().unwrap().push((url.into(), Reply::Status(code)));
        self
    }

    pub fn down(&self, url: impl Into<String>) -> &Self {
        self.replies.lock().unwrap().push((url.into(), Reply::Down));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, NetError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });

        let replies = self.replies.lock().unwrap();
        match replies.iter().rev().find(|(u, _)| u == url).map(|(_, r)| r) {
            Some(Reply::Body(b)) => Ok(b.clone()),
            Some(Reply::Status(code)) => Err(NetError::Status { code: *code, url: url.to_string() }),
            Some(Reply::Down) => Err(NetError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
            None => Err(NetError::Status { code: 404, url: url.to_string() }),
        }
    }
}

pub fn prices_url(route: &str) -> String {
    format!("{}/{}", PRICES_ENDPOINT, route)
}

pub fn graph_url(id: u32) -> String {
    format!("{}{}.json", GRAPH_ENDPOINT, id)
}

/// A daily graph whose newest point is `price`.
pub fn graph_body(price: i64) -> String {
    format!(
        r#"{{"daily":{{"1665100800000":{},"1665187200000":{}}},"average":{{"1665187200000":{}}}}}"#,
        price + 7,
        price,
        price
    )
}
