// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the custom resource API.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request as seen by the mock API server
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Default)]
struct State {
    scripted: HashMap<(String, String), VecDeque<(u16, String)>>,
    objects: Vec<(String, Vec<u8>)>,
    next_version: u64,
    requests: Vec<RecordedRequest>,
}

/// A mock HTTP service standing in for the API server.
///
/// Responses scripted for a (method, path) pair are served in order and the last one keeps
/// answering. Requests without a script hit a small in-memory store that reports
/// NotFound, AlreadyExists and Conflict like the real one.
#[derive(Clone, Default)]
pub struct MockService {
    state: Arc<Mutex<State>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.script("GET", path, status, body)
    }

    /// Queue a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.script("POST", path, status, body)
    }

    /// Queue a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.script("PUT", path, status, body)
    }

    /// Queue a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.script("DELETE", path, status, body)
    }

    fn script(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripted
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Seed the in-memory store with an object at the given resource path
    pub fn with_object(self, path: &str, object: Value) -> Self {
        let bytes = serde_json::to_vec(&object).unwrap();
        let seeded_version = object["metadata"]["resourceVersion"]
            .as_str()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_default();

        let mut state = self.state.lock().unwrap();
        state.next_version = state.next_version.max(seeded_version);
        state.objects.push((path.to_string(), bytes));
        drop(state);
        self
    }

    /// Bytes currently stored at the given resource path
    pub fn stored_bytes(&self, path: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
    }

    pub fn stored_object(&self, path: &str) -> Option<Value> {
        self.stored_bytes(path)
            .map(|b| serde_json::from_slice(&b).unwrap())
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_with(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn respond(&self, method: &str, path: &str, body: Vec<u8>) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            body: body.clone(),
        });

        if let Some(queue) = state
            .scripted
            .get_mut(&(method.to_string(), path.to_string()))
        {
            let response = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(response) = response {
                return response;
            }
        }

        state.serve(method, path, &body)
    }
}

impl State {
    fn position(&self, path: &str) -> Option<usize> {
        self.objects.iter().position(|(p, _)| p == path)
    }

    fn serve(&mut self, method: &str, path: &str, body: &[u8]) -> (u16, String) {
        let is_collection = path.trim_start_matches('/').split('/').count() == 6;

        match (method, is_collection) {
            ("GET", true) => {
                let prefix = format!("{}/", path);
                let items: Vec<Value> = self
                    .objects
                    .iter()
                    .filter(|(p, _)| p.starts_with(&prefix) && !p[prefix.len()..].contains('/'))
                    .map(|(_, b)| serde_json::from_slice(b).unwrap())
                    .collect();
                let list = serde_json::json!({
                    "kind": "List",
                    "apiVersion": "v1",
                    "metadata": { "resourceVersion": self.next_version.to_string() },
                    "items": items
                });
                (200, list.to_string())
            }
            ("GET", false) => match self.position(path) {
                Some(i) => (200, String::from_utf8(self.objects[i].1.clone()).unwrap()),
                None => (404, not_found_json(path)),
            },
            ("POST", true) => {
                let object: Value = serde_json::from_slice(body).unwrap();
                let name = object["metadata"]["name"].as_str().unwrap_or_default();
                let target = format!("{}/{}", path, name.to_lowercase());
                if self.position(&target).is_some() {
                    return (409, status_json("AlreadyExists", 409, &format!("{} already exists", name)));
                }
                self.objects.push((target, body.to_vec()));
                (201, String::from_utf8(body.to_vec()).unwrap())
            }
            ("PUT", false) => {
                let Some(i) = self.position(path) else {
                    return (404, not_found_json(path));
                };
                let mut object: Value = serde_json::from_slice(body).unwrap();
                let stored: Value = serde_json::from_slice(&self.objects[i].1).unwrap();
                if object["metadata"]["resourceVersion"] != stored["metadata"]["resourceVersion"] {
                    return (
                        409,
                        status_json(
                            "Conflict",
                            409,
                            "the object has been modified; please apply your changes to the latest version and try again",
                        ),
                    );
                }
                self.next_version += 1;
                object["metadata"]["resourceVersion"] = Value::String(self.next_version.to_string());
                let text = object.to_string();
                self.objects[i].1 = text.clone().into_bytes();
                (200, text)
            }
            ("DELETE", false) => match self.position(path) {
                Some(i) => {
                    self.objects.remove(i);
                    (200, status_json("", 200, "deleted"))
                }
                None => (404, not_found_json(path)),
            },
            _ => (405, status_json("MethodNotAllowed", 405, "method not allowed")),
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mock = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body
                .collect()
                .await
                .map_err(tower::BoxError::from)?
                .to_bytes()
                .to_vec();
            let (status, text) = mock.respond(parts.method.as_str(), parts.uri.path(), body);

            Ok::<_, tower::BoxError>(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(text.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a store status document
pub fn status_json(reason: &str, code: u16, message: &str) -> String {
    let status = if code < 400 { "Success" } else { "Failure" };
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": status,
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    status_json("NotFound", 404, &format!("{} not found", path))
}

/// Create a custom resource document with a counter in its spec
pub fn widget_json(name: &str, resource_version: &str, count: i64) -> Value {
    serde_json::json!({
        "apiVersion": "example.com/v1",
        "kind": "Widget",
        "metadata": {
            "name": name,
            "namespace": "default",
            "resourceVersion": resource_version
        },
        "spec": { "count": count }
    })
}
