//! CLI argument definitions for the prepline binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use prepline_core::Event;
use std::path::PathBuf;
use uuid::Uuid;

/// Prepline: event preparation timelines you can talk to.
#[derive(Parser, Debug)]
#[command(name = "prepline", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify an event and print its preparation timeline.
    Timeline {
        #[command(flatten)]
        event: EventArgs,
    },
    /// Answer a voice query about an event.
    Ask {
        /// The spoken query, e.g. "what's next?".
        query: String,
        #[command(flatten)]
        event: EventArgs,
    },
    /// Summarize progress for an event.
    Status {
        /// Include every step with its speakable text.
        #[arg(long)]
        detailed: bool,
        #[command(flatten)]
        event: EventArgs,
    },
    /// Execute an action previously returned by `ask`.
    ///
    /// Requires `--timeline`: step indices refer to the stored timeline the
    /// action was produced against, which stays valid after the event starts.
    Act {
        /// Action JSON, e.g. '{"action":"mark_complete","data":{"index":0,"name":"Pack"}}'.
        #[arg(long)]
        action: String,
        #[command(flatten)]
        event: EventArgs,
    },
}

/// The event being asked about, plus the state the caller has stored for it.
#[derive(Args, Debug, Clone)]
pub struct EventArgs {
    /// Event id, as stored by the caller. A random id is generated when
    /// omitted, so completion updates only line up across runs when it is set.
    #[arg(long)]
    pub id: Option<Uuid>,

    /// Event title.
    #[arg(short = 't', long)]
    pub title: String,

    /// Event start (RFC 3339).
    #[arg(short = 's', long)]
    pub start: Option<DateTime<Utc>>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Stored timeline JSON. Generated from the event when omitted, except
    /// for `act`, which refuses to run without one.
    #[arg(long)]
    pub timeline: Option<PathBuf>,

    /// Completed step indices, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub completed: Vec<usize>,

    /// Evaluate as of this instant (RFC 3339) instead of the current time.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

impl EventArgs {
    pub fn to_event(&self) -> Event {
        let mut event = match self.start {
            Some(start) => Event::new(self.title.clone(), start),
            None => Event::unscheduled(self.title.clone()),
        };
        if let Some(id) = self.id {
            event.id = id;
        }
        event.description = self.description.clone();
        event.location = self.location.clone();
        event
    }

    pub fn resolve_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PREPLINE_CONFIG env var > platform default (~/.prepline/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PREPLINE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log filter.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            return level;
        }
        config_level.to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".prepline").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".prepline").join("config.toml");
    }
    PathBuf::from("config.toml")
}
