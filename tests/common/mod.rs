#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use boosta::{ApiResponse, Client, ClientBuilder, Clock, Output};
use serde_json::Value;
use tokio::time::Instant;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

pub fn client_for(server: &MockServer) -> Client {
    ClientBuilder::new()
        .api_key(API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Clock whose sleeps return immediately and advance virtual time.
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Records every document instead of printing it.
#[derive(Default)]
pub struct CapturedOutput {
    pub infos: Mutex<Vec<Value>>,
    pub results: Mutex<Vec<Value>>,
}

impl CapturedOutput {
    pub fn infos(&self) -> Vec<Value> {
        self.infos.lock().unwrap().clone()
    }

    pub fn results(&self) -> Vec<Value> {
        self.results.lock().unwrap().clone()
    }
}

impl Output for CapturedOutput {
    fn info(&self, record: &Value) {
        self.infos.lock().unwrap().push(record.clone());
    }

    fn result(&self, response: &ApiResponse) {
        self.results
            .lock()
            .unwrap()
            .push(serde_json::to_value(response).unwrap());
    }
}
