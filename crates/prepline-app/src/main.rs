//! Prepline application binary - composition root.
//!
//! Ties the prepline crates into a single command-line tool:
//! 1. Load configuration from TOML
//! 2. Build the planner (classifier + timeline generator) from it
//! 3. Load a stored timeline or generate one for the event
//! 4. Answer the query, summarize, or execute an action, printing JSON

mod cli;

use std::path::Path;

use clap::Parser;
use prepline_core::{CompletionSet, Event, PrepConfig, Timeline};
use prepline_timeline::Planner;
use prepline_voice::{
    apply_action, DetailedVoiceView, SimpleVoiceView, VoiceAction, VoiceAssistant,
};
use serde_json::{json, Value};

use cli::{CliArgs, Command, EventArgs};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read a stored timeline, or generate one for `event` as of `args.now`.
fn load_timeline(planner: &Planner, event: &Event, args: &EventArgs) -> AppResult<Timeline> {
    if let Some(ref path) = args.timeline {
        return read_timeline(path);
    }
    planner
        .plan(event, args.resolve_now())
        .ok_or_else(|| "No timeline available: the event has no future start time".into())
}

fn read_timeline(path: &Path) -> AppResult<Timeline> {
    let content = std::fs::read_to_string(path)?;
    let timeline: Timeline = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), steps = timeline.len(), "Stored timeline loaded");
    Ok(timeline)
}

/// Execute one subcommand and return its JSON output.
fn run(command: &Command, planner: &Planner, assistant: &VoiceAssistant) -> AppResult<Value> {
    match command {
        Command::Timeline { event: args } => {
            let event = args.to_event();
            let timeline = load_timeline(planner, &event, args)?;
            Ok(serde_json::to_value(&timeline)?)
        }
        Command::Ask { query, event: args } => {
            let event = args.to_event();
            let timeline = load_timeline(planner, &event, args)?;
            let completions: CompletionSet = args.completed.iter().copied().collect();
            let reply = assistant.answer(query, &event, &timeline, &completions, args.resolve_now());
            Ok(serde_json::to_value(&reply)?)
        }
        Command::Status {
            detailed,
            event: args,
        } => {
            let event = args.to_event();
            let timeline = load_timeline(planner, &event, args)?;
            let completions: CompletionSet = args.completed.iter().copied().collect();
            let now = args.resolve_now();

            let response = assistant.summarize(&event, &timeline, &completions, now);
            let view = if *detailed {
                serde_json::to_value(DetailedVoiceView::build(&event, &timeline, &completions, now))?
            } else {
                let snapshot = assistant.snapshot(&event, &timeline, &completions, now);
                serde_json::to_value(SimpleVoiceView::from_snapshot(&snapshot, now))?
            };
            Ok(json!({ "response": response, "view": view }))
        }
        Command::Act {
            action,
            event: args,
        } => {
            let event = args.to_event();
            let path = args
                .timeline
                .as_deref()
                .ok_or("act needs --timeline: the stored timeline the action was produced against")?;
            let timeline = read_timeline(path)?;
            let action: VoiceAction = serde_json::from_str(action)?;
            let mut completions: CompletionSet = args.completed.iter().copied().collect();

            let outcome = apply_action(event.id, &action, &mut completions, timeline.len())?;
            Ok(json!({ "outcome": outcome, "completed": completions }))
        }
    }
}

fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    // Config is read before tracing so the file can set the log level.
    let config_file = args.resolve_config_path();
    let config = PrepConfig::load_or_default(&config_file);

    // Tracing goes to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(args.resolve_log_level(&config.general.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting prepline v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = %config_file.display(),
        patterns = config.patterns.len(),
        timezone = %config.family.timezone,
        "Configuration loaded"
    );

    let planner = Planner::from_config(&config);
    let assistant = VoiceAssistant::default();

    let output = run(&args.command, &planner, &assistant)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
