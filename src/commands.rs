//! Command handlers.
//!
//! Each handler runs one command against a [`Client`], writes its documents
//! through an [`Output`] and returns the process exit code.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;

use crate::cli::Command;
use crate::client::{Client, ClientBuilder};
use crate::errors::BoostaError;
use crate::models::{ApiResponse, PollEvent, VideoType};
use crate::output::Output;
use crate::poller::{poll_until_done, Clock, PollOptions};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
/// Configuration problems, such as a missing credential.
pub const EXIT_CONFIG: u8 = 2;

/// Arguments of `submit`.
#[derive(Debug, Clone)]
pub struct SubmitArgs {
    pub video_url: String,
    pub video_type: VideoType,
    pub config_name: Option<String>,
    pub wait: bool,
    pub poll_interval: Duration,
    /// Zero means wait without limit.
    pub max_wait: Duration,
}

/// 0 for a success response, 1 otherwise. Status 0 (no response) is a failure.
pub fn exit_code(response: &ApiResponse) -> u8 {
    if response.is_success() {
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}

/// Exit code for a client that could not be built.
pub fn config_exit_code(err: &BoostaError) -> u8 {
    match err {
        BoostaError::MissingApiKey => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}

/// Build the client, reporting a failure on stderr as its exit code.
pub fn connect(builder: ClientBuilder) -> Result<Client, u8> {
    builder.build().map_err(|e| {
        match e {
            BoostaError::MissingApiKey => eprintln!("{e}"),
            _ => eprintln!("Error: {e}"),
        }
        config_exit_code(&e)
    })
}

/// Route a parsed command to its handler.
pub async fn run<C: Clock + ?Sized>(
    command: Command,
    client: &Client,
    clock: &C,
    output: Arc<dyn Output>,
) -> u8 {
    match command {
        Command::Submit(cmd) => submit(client, clock, &SubmitArgs::from(cmd), output).await,
        Command::Status { job_id } => status(client, &job_id, output.as_ref()).await,
        Command::List => list(client, output.as_ref()).await,
        Command::Usage => usage(client, output.as_ref()).await,
    }
}

/// Submit a job and, when asked to, wait for it.
///
/// If the server refuses because another job is still active and waiting
/// was requested, the active job is watched instead of submitting again.
pub async fn submit<C: Clock + ?Sized>(
    client: &Client,
    clock: &C,
    args: &SubmitArgs,
    output: Arc<dyn Output>,
) -> u8 {
    let response = client
        .submit_job(&args.video_url, args.video_type, args.config_name.as_deref())
        .await;

    if response.is_active_job_conflict() {
        return match response.job_id() {
            Some(job_id) if args.wait => {
                info!(%job_id, "another job is active, waiting on it");
                output.info(&json!({ "info": "active_job_exists", "job_id": job_id }));
                wait_for(client, clock, &job_id, args, output).await
            }
            _ => finish(response, output.as_ref()),
        };
    }

    if !response.is_success() || !args.wait {
        return finish(response, output.as_ref());
    }

    match response.job_id() {
        Some(job_id) => {
            info!(%job_id, "job submitted, waiting for completion");
            wait_for(client, clock, &job_id, args, output).await
        }
        None => finish(
            ApiResponse::from_value(
                500,
                json!({
                    "error": "missing_job_id_in_response",
                    "raw": response.payload,
                }),
            ),
            output.as_ref(),
        ),
    }
}

pub async fn status(client: &Client, job_id: &str, output: &dyn Output) -> u8 {
    finish(client.get_job(job_id).await, output)
}

pub async fn list(client: &Client, output: &dyn Output) -> u8 {
    finish(client.list_jobs().await, output)
}

pub async fn usage(client: &Client, output: &dyn Output) -> u8 {
    finish(client.get_usage().await, output)
}

async fn wait_for<C: Clock + ?Sized>(
    client: &Client,
    clock: &C,
    job_id: &str,
    args: &SubmitArgs,
    output: Arc<dyn Output>,
) -> u8 {
    let sink = Arc::clone(&output);
    let opts = PollOptions {
        interval: args.poll_interval,
        max_wait: args.max_wait,
        on_event: Some(Box::new(move |event: &PollEvent| sink.info(&event.to_record()))),
    };
    let outcome = poll_until_done(client, clock, job_id, &opts).await;
    finish(outcome, output.as_ref())
}

fn finish(response: ApiResponse, output: &dyn Output) -> u8 {
    output.result(&response);
    exit_code(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_treats_status_zero_as_failure() {
        assert_eq!(exit_code(&ApiResponse::network_error("dns")), EXIT_FAILURE);
        assert_eq!(exit_code(&ApiResponse::from_value(200, json!({}))), EXIT_OK);
        assert_eq!(exit_code(&ApiResponse::from_value(302, json!({}))), EXIT_OK);
        assert_eq!(exit_code(&ApiResponse::from_value(400, json!({}))), EXIT_FAILURE);
        assert_eq!(exit_code(&ApiResponse::from_value(408, json!({}))), EXIT_FAILURE);
    }

    #[test]
    fn missing_api_key_exits_with_config_code() {
        assert_eq!(config_exit_code(&BoostaError::MissingApiKey), EXIT_CONFIG);
        let err = connect(ClientBuilder::new().api_key("")).unwrap_err();
        assert_eq!(err, 2);
    }

    #[test]
    fn other_build_errors_exit_with_failure() {
        let err = connect(ClientBuilder::new().api_key("k").base_url("not a url")).unwrap_err();
        assert_eq!(err, EXIT_FAILURE);
    }
}
