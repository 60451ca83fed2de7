//! # Boosta API client
//!
//! Client and command-line driver for the Boosta video processing API:
//! submit jobs, poll them to completion, list jobs and check usage.
//!
//! Request outcomes are plain [`ApiResponse`] values (status code plus JSON
//! object), including HTTP error statuses and network failures (status `0`).
//! Only client configuration can fail with a [`BoostaError`].
//!
//! ## Quick start
//!
//! ```no_run
//! use boosta::{poll_until_done, ClientBuilder, PollOptions, TokioClock, VideoType};
//!
//! #[tokio::main]
//! async fn main() -> boosta::Result<()> {
//!     // Reads BOOSTA_API_KEY from the environment.
//!     let client = ClientBuilder::new().build()?;
//!
//!     let submitted = client
//!         .submit_job("https://example.com/stream.mp4", VideoType::Gaming, None)
//!         .await;
//!
//!     if let Some(job_id) = submitted.job_id() {
//!         let opts = PollOptions {
//!             on_event: Some(Box::new(|event: &boosta::PollEvent| {
//!                 println!("{}", event.to_record())
//!             })),
//!             ..PollOptions::default()
//!         };
//!         let outcome = poll_until_done(&client, &TokioClock, &job_id, &opts).await;
//!         println!("{} {:?}", outcome.status_code, outcome.job_status());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
mod client;
pub mod commands;
mod errors;
mod models;
mod output;
mod poller;
mod transport;

pub use client::{Client, ClientBuilder, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use errors::{BoostaError, Result};
pub use models::{
    decode_body, ApiResponse, PollEvent, SubmitJob, VideoType, DEFAULT_RETRY_AFTER_SECS,
};
pub use output::{to_ascii_json, Output, StdoutOutput};
pub use poller::{
    poll_until_done, Clock, JobStatusSource, PollOptions, TokioClock, DEFAULT_MAX_WAIT,
    DEFAULT_POLL_INTERVAL,
};
pub use transport::Transport;
