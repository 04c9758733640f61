//! Mock Platform API for command tests

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::output::OutputFormat;

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    query: Option<(String, String)>,
    body: Value,
}

#[derive(Debug, Clone, Default)]
pub struct MockApi {
    routes: Arc<Mutex<Vec<Route>>>,
    seen: Arc<Mutex<Vec<(Method, String, Bytes)>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a 200 JSON body
    pub fn on(&self, method: Method, path: &str, body: Value) -> &Self {
        self.routes.lock().unwrap().push(Route {
            method,
            path: path.to_string(),
            query: None,
            body,
        });
        self
    }

    /// Answer `method path` only when `name=value` is in the query
    pub fn on_query(&self, method: Method, path: &str, (name, value): (&str, &str), body: Value) -> &Self {
        self.routes.lock().unwrap().push(Route {
            method,
            path: path.to_string(),
            query: Some((name.to_string(), value.to_string())),
            body,
        });
        self
    }

    /// Number of requests received for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, p, _)| p == path)
            .count()
    }

    /// JSON bodies received for `method path`
    pub fn bodies(&self, method: Method, path: &str) -> Vec<Value> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p, _)| *m == method && p == path)
            .map(|(_, _, body)| serde_json::from_slice(body).unwrap_or(Value::Null))
            .collect()
    }

    /// Start serving and return a configuration pointing at the mock
    pub async fn config(&self) -> Config {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Config {
            url: format!("http://{}", addr),
            access_token: Some("test-token".to_string()),
            workspace: None,
            output: OutputFormat::Json,
            insecure: false,
        }
    }
}

async fn handle(
    State(api): State<MockApi>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    api.seen
        .lock()
        .unwrap()
        .push((method.clone(), path.clone(), body));

    let route = api
        .routes
        .lock()
        .unwrap()
        .iter()
        .find(|r| {
            r.method == method
                && r.path == path
                && r.query.as_ref().is_none_or(|q| query.contains(q))
        })
        .map(|r| r.body.clone());

    match route {
        Some(body) => axum::Json(body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "message": "no mock route" })),
        )
            .into_response(),
    }
}
