//! Command-line surface.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::client::{ClientBuilder, DEFAULT_BASE_URL};
use crate::commands::SubmitArgs;
use crate::models::VideoType;

#[derive(Parser, Debug)]
#[command(name = "boosta")]
#[command(about = "Boosta API utility for submit/status/list/usage.", long_about = None)]
pub struct Cli {
    /// API root URL
    #[arg(long, env = "BOOSTA_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// HTTP timeout seconds.
    #[arg(long, default_value_t = 60, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Client settings from the command line; the key comes from the environment.
    pub fn client_builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .base_url(&self.base_url)
            .timeout(self.request_timeout())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a new Boosta job.
    Submit(SubmitCommand),
    /// Get job status.
    Status {
        /// Boosta job_id.
        #[arg(long)]
        job_id: String,
    },
    /// List jobs.
    List,
    /// Get usage/credits.
    Usage,
}

#[derive(Args, Debug)]
pub struct SubmitCommand {
    /// Source video URL.
    #[arg(long)]
    pub video_url: String,

    /// Boosta video_type value.
    #[arg(long, value_enum)]
    pub video_type: VideoType,

    /// Optional Boosta config name.
    #[arg(long)]
    pub config_name: Option<String>,

    /// Poll until job reaches completed or failed.
    #[arg(long)]
    pub wait: bool,

    /// Polling interval in seconds when --wait is used.
    #[arg(long, default_value_t = 15)]
    pub poll_interval: u64,

    /// Max wait in seconds for --wait (0 = no timeout).
    #[arg(long, default_value_t = 1800, allow_negative_numbers = true)]
    pub max_wait: i64,
}

impl From<SubmitCommand> for SubmitArgs {
    fn from(cmd: SubmitCommand) -> Self {
        Self {
            video_url: cmd.video_url,
            video_type: cmd.video_type,
            config_name: cmd.config_name,
            wait: cmd.wait,
            poll_interval: Duration::from_secs(cmd.poll_interval),
            max_wait: Duration::from_secs(cmd.max_wait.max(0) as u64),
        }
    }
}
