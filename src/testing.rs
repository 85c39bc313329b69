// src/testing.rs
//! In-memory `Transport` for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::http::{Transport, TransportError};

#[derive(Clone)]
enum Reply {
    Body(String),
    ConnectTimeout,
    Status(u16),
}

/// Replies queued per URL, consumed in order. Unscripted URLs get the fallback,
/// or a 404 when there is none. Every requested URL is recorded.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    fallback: Option<Reply>,
    log: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(self, url: &str, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn ok(self, url: &str, body: &str) -> Self {
        self.push(url, Reply::Body(body.to_string()))
    }

    pub(crate) fn connect_timeout(self, url: &str) -> Self {
        self.push(url, Reply::ConnectTimeout)
    }

    pub(crate) fn status(self, url: &str, status: u16) -> Self {
        self.push(url, Reply::Status(status))
    }

    pub(crate) fn otherwise(mut self, body: &str) -> Self {
        self.fallback = Some(Reply::Body(body.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.log.borrow_mut().push(url.to_string());
        let queued = self
            .replies
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front);

        match queued.or_else(|| self.fallback.clone()) {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::ConnectTimeout) => Err(TransportError::ConnectTimeout { url: url.to_string() }),
            Some(Reply::Status(status)) => Err(TransportError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
