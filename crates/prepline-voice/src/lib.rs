//! Voice queries over preparation timelines.
//!
//! Parses spoken questions ("what's next?", "mark the cleats done"), answers
//! them from a point-in-time snapshot of the timeline, and executes the
//! completion actions those answers suggest.

pub mod action;
pub mod assistant;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod response;
pub mod snapshot;
pub mod types;
pub mod views;

pub use action::{apply_action, ActionOutcome, CompletionLedger, CompletionUpdate};
pub use assistant::{VoiceAssistant, VoiceReply};
pub use error::VoiceError;
pub use matcher::{task_candidate, LooseMatcher, TaskMatcher};
pub use parser::IntentParser;
pub use response::ResponseComposer;
pub use snapshot::{format_time_until, VoiceSnapshot};
pub use types::{IndexedStep, IntentKind, IntentMatch, VoiceAction, VoiceIntent, VoiceResponse};
pub use views::{DetailedVoiceView, SimpleVoiceView};
