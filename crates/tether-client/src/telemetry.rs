//! Trace channel for client records.
//!
//! Editors show a language client's logs in an output panel, so the host
//! supplies the sink. [`subscriber`] builds a subscriber over that sink for
//! scoped use; [`initialise`] installs one process-wide the first time it is
//! called.

use once_cell::sync::OnceCell;
use tether_config::{Config, LogFormat};
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

static TRACE_CHANNEL: OnceCell<()> = OnceCell::new();

/// Subscriber type produced by [`subscriber`].
pub type TraceSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Failures while setting up the trace channel.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `logFilter` is not a valid filter expression.
    #[error("invalid log filter '{filter}': {reason}")]
    Filter {
        /// Expression taken from configuration.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// Another subscriber already owns the process-wide slot.
    #[error("a global tracing subscriber is already installed: {0}")]
    Occupied(#[source] SetGlobalDefaultError),
}

/// Builds a subscriber writing client records to `writer`.
///
/// Records are filtered by `logFilter` and formatted per `logFormat`, with
/// RFC 3339 UTC timestamps and no terminal colouring.
pub fn subscriber<W>(config: &Config, writer: W) -> Result<TraceSubscriber, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| {
        TelemetryError::Filter {
            filter: config.log_filter().to_owned(),
            reason: error.to_string(),
        }
    })?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}

/// Installs the process-wide trace channel once.
///
/// Returns `true` when this call installed it and `false` when an earlier
/// call already had. The writer of a later call is dropped.
pub fn initialise<W>(config: &Config, writer: W) -> Result<bool, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let mut installed = false;
    TRACE_CHANNEL.get_or_try_init(|| {
        tracing::subscriber::set_global_default(subscriber(config, writer)?)
            .map_err(TelemetryError::Occupied)?;
        installed = true;
        Ok::<(), TelemetryError>(())
    })?;
    Ok(installed)
}
