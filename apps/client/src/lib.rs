//! Lesson review client.
//!
//! Wires the review-core cursor and stroke buffer to the lesson backend:
//! - `api`: HTTP client for lesson content, progress tracking and resume
//! - `source`: content sources and the fall-back-to-built-in-lesson policy
//! - `progress`: debounced progress reporting
//! - `screen`: the per-screen controller
//! - `terminal`: a line-based front-end used by the `hanyu-review` binary

pub mod api;
pub mod auth;
pub mod config;
pub mod progress;
pub mod screen;
pub mod source;
pub mod terminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use api::{ApiError, LessonApi, ResumePoint};
pub use config::ClientConfig;
pub use progress::{ProgressReporter, ProgressSink};
pub use screen::{LoadError, LoadOutcome, LoadTicket, ScreenController};
pub use source::{load_with_fallback, ContentError, ContentSource, MockSource, Origin, RemoteSource};

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
