use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use reqwest::Url;
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    received: Arc<Mutex<Vec<Value>>>,
}

/// Throwaway stand-in for the spreadsheet Web App, listening on a random
/// local port and recording every JSON body posted to it.
pub struct MockSheets {
    url: Url,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockSheets {
    pub async fn start(status: StatusCode, body: &'static str) -> Result<Self> {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [`MockSheets::start`], but every response is held back by `delay`.
    pub async fn start_with_delay(
        status: StatusCode,
        body: &'static str,
        delay: Duration,
    ) -> Result<Self> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            received: received.clone(),
        };

        let router = Router::new().route("/exec", post(capture)).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            url: Url::parse(&format!("http://{}/exec", addr))?,
            received,
        })
    }

    pub fn url(&self) -> Url {
        self.url.clone()
    }

    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }
}

async fn capture(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.received.lock().await.push(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// URL of a local port nothing is listening on.
pub async fn unused_local_url() -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{}/exec", addr))?)
}
