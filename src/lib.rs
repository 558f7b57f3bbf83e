//! Assemble mutation-testing results into one XML document.
//!
//! A [`DocumentBuilder`] collects subjects (original methods), their mutants,
//! the global PEG dedup table and node equivalences, then renders them as
//! indented XML to a stream or a file:
//!
//! ```no_run
//! use std::path::Path;
//! use mutxml::{DocumentBuilder, Settings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = DocumentBuilder::new();
//! doc.add_subject("Foo.java", "Foo@bar(int)", 10);
//! doc.add_mutant("Foo@bar(int)", "5", 42)?;
//! doc.add_id_table([(10, "(+ 1 2)"), (42, "(- 1 2)")]);
//! doc.add_equivalences([(10, 42)]);
//! doc.render_to_file(Path::new("subjects.xml"), &Settings::load(None)?)?;
//! # Ok(())
//! # }
//! ```

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use crate::config::Settings;
pub use crate::domain::{DocumentBuilder, DomainError, MutantLogRow, NodeEquivalence, PegId};
pub use crate::infrastructure::{InfraError, InfraResult};

/// Install a stderr logger for applications embedding the builder.
///
/// `verbosity` 0..=3 maps to WARN, INFO, DEBUG, TRACE. Does nothing if a
/// global subscriber is already installed.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    if tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized at {}", filter);
    }
}
