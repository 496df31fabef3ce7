//! In-memory [`HttpClient`] for façade tests: records every request and
//! answers from a queue of canned replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{HttpClient, Method, RequestOptions};

enum Reply {
    Json(Value),
    Status(u16, String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub method: Method,
    pub path: String,
    pub options: RequestOptions,
}

pub(crate) struct FakeClient {
    user_id: Option<i64>,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeClient {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Signed in as user 7.
    pub fn authenticated() -> Self {
        Self {
            user_id: Some(7),
            ..Self::anonymous()
        }
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Json(body));
        self
    }

    pub fn reply_status(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Status(status, body.to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request issued so far.
    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests[0].clone()
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.to_owned(),
            options,
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status, body)) => Err(ClientError::Status {
                status,
                url: path.to_owned(),
                body,
            }),
            None => panic!("no canned reply for {method} {path}"),
        }
    }

    fn session_user_id(&self) -> Option<i64> {
        self.user_id
    }
}
