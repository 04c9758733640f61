//! In-process mock of the Platform API
//!
//! Every request is recorded, then answered by the first registered route
//! matching its method, path and (optionally) one query pair. Unmatched
//! requests get a 404 with a JSON message.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as received by the mock
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Seen {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    query: Option<(String, String)>,
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct MockApi {
    routes: Arc<Mutex<Vec<Route>>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.push(Route {
            method,
            path: path.to_string(),
            query: None,
            status: StatusCode::from_u16(status).unwrap(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from(body.to_string()),
        })
    }

    /// Answer `method path` with a JSON body, only when `name=value` is in the query
    pub fn on_query(
        &self,
        method: Method,
        path: &str,
        (name, value): (&str, &str),
        status: u16,
        body: Value,
    ) -> &Self {
        self.push(Route {
            method,
            path: path.to_string(),
            query: Some((name.to_string(), value.to_string())),
            status: StatusCode::from_u16(status).unwrap(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from(body.to_string()),
        })
    }

    /// Answer `method path` with raw bytes and extra headers
    pub fn on_raw(
        &self,
        method: Method,
        path: &str,
        status: u16,
        headers: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> &Self {
        self.push(Route {
            method,
            path: path.to_string(),
            query: None,
            status: StatusCode::from_u16(status).unwrap(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.into(),
        })
    }

    fn push(&self, route: Route) -> &Self {
        self.routes.lock().unwrap().push(route);
        self
    }

    /// Requests received so far, in order
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    /// Requests received for one method and path
    pub fn seen_at(&self, method: Method, path: &str) -> Vec<Seen> {
        self.seen()
            .into_iter()
            .filter(|s| s.method == method && s.path == path)
            .collect()
    }

    /// Bind to a random local port and serve in the background
    ///
    /// # Returns
    /// The base URL of the running server
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn handle(
    State(api): State<MockApi>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let seen = Seen {
        method: method.clone(),
        path: uri.path().to_string(),
        query: query.clone(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    };
    api.seen.lock().unwrap().push(seen);

    let route = api
        .routes
        .lock()
        .unwrap()
        .iter()
        .find(|r| {
            r.method == method
                && r.path == uri.path()
                && r.query.as_ref().is_none_or(|q| query.contains(q))
        })
        .cloned();

    match route {
        Some(route) => {
            let mut builder = Response::builder().status(route.status);
            for (name, value) in &route.headers {
                builder = builder.header(name, value);
            }
            builder.body(Body::from(route.body)).unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message":"no mock route"}"#))
            .unwrap(),
    }
}
