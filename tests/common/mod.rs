//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::Mutex;

use wiki_notes::{NotesError, Settings, Transport};

/// One request seen by the fake.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

/// Canned reply for the next request.
pub enum Reply {
    Ok(String),
    Status(u16, String),
}

/// Answers requests from a queue of replies and records every call.
/// Running out of replies answers with a 599 so tests fail loudly.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(self, body: serde_json::Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Ok(body.to_string()));
        self
    }

    pub fn reply_raw(self, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Ok(body.to_string()));
        self
    }

    pub fn reply_status(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Status(status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, NotesError> {
        self.calls.lock().unwrap().push(Call {
            method,
            endpoint: endpoint.to_string(),
            body: body.cloned(),
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Ok(body)) => Ok(body),
            Some(Reply::Status(status, body)) => Err(NotesError::RemoteApi { status, body }),
            None => Err(NotesError::RemoteApi {
                status: 599,
                body: "no scripted reply".into(),
            }),
        }
    }
}

pub fn settings() -> Settings {
    Settings {
        domain: "x.atlassian.net".into(),
        email: "me@example.com".into(),
        api_token: "token".into(),
        space_id: "42".into(),
        parent_page_id: "7".into(),
    }
}
