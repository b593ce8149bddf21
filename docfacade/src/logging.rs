//! Console logging setup.
//!
//! The facade itself only emits `tracing` events: an info line when a store is
//! initialized and trace-level spans around every operation. [`Tracing::setup`] installs a
//! subscriber that prints those events as single lines on stdout.

use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::{
    Layer, fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};

use docfacade_core::error::{FacadeError, FacadeResult};

pub struct Tracing;

impl Tracing {
    /// Logs info, warning and error lines to stdout.
    pub fn setup() -> FacadeResult<()> {
        Self::setup_with_level(Level::INFO)
    }

    /// Logs every event at `level` or above to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Configuration`] if a global subscriber is already installed.
    pub fn setup_with_level(level: Level) -> FacadeResult<()> {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_target(false)
                    .with_writer(std::io::stdout.with_max_level(level))
                    .with_filter(LevelFilter::from_level(level)),
            )
            .try_init()
            .map_err(|e| FacadeError::Configuration(format!("failed to setup tracing: {e}")))
    }
}
