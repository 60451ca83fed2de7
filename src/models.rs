use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Rate-limit pause used when a 429 carries no usable `retry_after`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Kind of footage being submitted, sent as `video_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Conversation,
    Gaming,
    Faceless,
    Solo,
    Vlog,
    Movies,
}

/// POST /jobs request body.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitJob {
    pub video_url: String,
    pub video_type: VideoType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
}

impl SubmitJob {
    /// An empty `config_name` is treated the same as none.
    pub fn new(
        video_url: impl Into<String>,
        video_type: VideoType,
        config_name: Option<String>,
    ) -> Self {
        Self {
            video_url: video_url.into(),
            video_type,
            config_name: config_name.filter(|name| !name.is_empty()),
        }
    }
}

/// A status code paired with a decoded JSON object.
///
/// `status_code` is the server's code, `0` when no response was obtained, or
/// a locally synthesized code (408 poll timeout, 500 missing job id).
/// Serializes as the result document `{"status_code": .., "data": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status_code: u16,
    #[serde(rename = "data")]
    pub payload: Map<String, Value>,
}

impl ApiResponse {
    pub fn new(status_code: u16, payload: Map<String, Value>) -> Self {
        Self {
            status_code,
            payload,
        }
    }

    /// Build a response from a `json!` object literal.
    ///
    /// Non-object values are wrapped the same way response bodies are.
    pub fn from_value(status_code: u16, value: Value) -> Self {
        Self::new(status_code, into_object(value))
    }

    /// Status 0, for exchanges that never produced a response.
    pub fn network_error(details: impl std::fmt::Display) -> Self {
        Self::from_value(0, json!({ "error": format!("network_error: {details}") }))
    }

    /// A 2xx/3xx reply. Status 0 never counts as success.
    pub fn is_success(&self) -> bool {
        self.status_code != 0 && self.status_code < 400
    }

    pub fn is_network_error(&self) -> bool {
        self.status_code == 0
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    /// The server refused a submission because another job is still active.
    pub fn is_active_job_conflict(&self) -> bool {
        self.status_code >= 400 && self.get_str("status") == Some("active_job_exists")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// The job's `status` field, if it is a string.
    pub fn job_status(&self) -> Option<&str> {
        self.get_str("status")
    }

    /// `completed` or `failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self.job_status(), Some("completed" | "failed"))
    }

    /// The `job_id` field as a non-empty string. Numeric ids are stringified.
    pub fn job_id(&self) -> Option<String> {
        match self.payload.get("job_id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Seconds to pause after a 429, falling back to
    /// [`DEFAULT_RETRY_AFTER_SECS`] when absent, negative or unparseable.
    pub fn retry_after(&self) -> u64 {
        self.payload
            .get("retry_after")
            .and_then(parse_seconds)
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
    }
}

fn parse_seconds(val: &Value) -> Option<u64> {
    match val {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Decode a response body into a JSON object.
///
/// - empty body: `{}`
/// - not JSON: `{"raw": <text>}`
/// - JSON that is not an object: `{"data": <value>}`
pub fn decode_body(text: &str) -> Map<String, Value> {
    if text.is_empty() {
        return Map::new();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => into_object(value),
        Err(_) => {
            let mut map = Map::new();
            map.insert("raw".to_string(), Value::String(text.to_string()));
            map
        }
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    }
}

/// Observability records emitted while polling.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// The job is not finished yet.
    Progress {
        job_id: String,
        status: Value,
        progress: Value,
        step: Value,
    },
    /// The server answered 429; the poller pauses for `retry_after` seconds.
    RateLimited { job_id: String, retry_after: u64 },
}

impl PollEvent {
    pub(crate) fn progress(job_id: &str, response: &ApiResponse) -> Self {
        let field = |key: &str| response.get(key).cloned().unwrap_or(Value::Null);
        PollEvent::Progress {
            job_id: job_id.to_string(),
            status: field("status"),
            progress: field("progress"),
            step: field("step"),
        }
    }

    /// The JSON document printed for this event.
    pub fn to_record(&self) -> Value {
        match self {
            PollEvent::Progress {
                job_id,
                status,
                progress,
                step,
            } => json!({
                "job_id": job_id,
                "status": status,
                "progress": progress,
                "step": step,
            }),
            PollEvent::RateLimited {
                job_id,
                retry_after,
            } => json!({
                "info": "rate_limited_during_poll",
                "retry_after": retry_after,
                "job_id": job_id,
            }),
        }
    }
}
