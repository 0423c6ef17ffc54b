//! The `tracing` backend.
//!
//! Each initialization builds its own [`Dispatch`]: a [`Registry`] with one
//! `fmt` layer for standard error and, when `log_dir` is set, one layer per
//! severity file. Records are emitted through
//! [`tracing::dispatcher::with_default`], so init/shutdown cycles never touch
//! the process-wide default subscriber the host application may have set.

#[cfg(feature = "file")]
use std::path::Path;
use std::sync::Mutex;

use tracing::{Dispatch, Level, Metadata};
use tracing_subscriber::filter::{FilterFn, filter_fn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt};

#[cfg(feature = "file")]
use crate::writer::SeverityFileWriter;
use crate::{Error, LogOptions, LogSink, Result, Severity};

/// Target of every record emitted by the facade.
pub const TARGET: &str = "cortexi";
/// Target of records logged at `Fatal`; `tracing` has no level above `ERROR`.
pub const FATAL_TARGET: &str = "cortexi::fatal";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps a file writer's background worker alive; dropping it flushes.
#[cfg(feature = "file")]
type FileGuard = tracing_appender::non_blocking::WorkerGuard;
#[cfg(not(feature = "file"))]
type FileGuard = ();

/// Sink that forwards records to a `tracing-subscriber` stack.
pub struct TracingSink {
    dispatch: Dispatch,
    guards: Mutex<Vec<FileGuard>>,
}

impl TracingSink {
    /// Build the backend for `options`.
    ///
    /// File setup failures are reported on standard error and the sink keeps
    /// the stderr destination.
    pub fn new(options: &LogOptions) -> Self {
        let ansi = options.color && cfg!(feature = "ansi");
        let mut layers: Vec<BoxedLayer> = vec![formatted_layer(
            std::io::stderr,
            ansi,
            options,
            stderr_min_severity(options),
        )];
        let mut guards = Vec::new();

        if !options.log_dir.is_empty() {
            match file_layers(options) {
                Ok(opened) => {
                    for (layer, guard) in opened {
                        layers.push(layer);
                        guards.push(guard);
                    }
                }
                Err(e) => {
                    eprintln!("Failed to set up log files, continuing without them: {}", e);
                }
            }
        }

        let subscriber = tracing_subscriber::registry().with(layers);

        Self {
            dispatch: Dispatch::new(subscriber),
            guards: Mutex::new(guards),
        }
    }
}

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Info => tracing::info!(target: TARGET, "{}", message),
            Severity::Warning => tracing::warn!(target: TARGET, "{}", message),
            Severity::Error => tracing::error!(target: TARGET, "{}", message),
            Severity::Fatal => {
                tracing::error!(target: FATAL_TARGET, severity = "FATAL", "{}", message)
            }
        });
    }

    fn close(&self) {
        // Dropping a WorkerGuard flushes its writer and joins the worker.
        self.guards.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Severity of a record emitted through [`TracingSink`].
fn severity_of(metadata: &Metadata<'_>) -> Severity {
    if metadata.target() == FATAL_TARGET {
        return Severity::Fatal;
    }
    match *metadata.level() {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warning,
        _ => Severity::Info,
    }
}

fn severity_filter(min: Severity) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |metadata| severity_of(metadata) >= min)
}

/// Lowest severity mirrored to stderr.
///
/// Without mirroring, ERROR and above still reach stderr, which is glog's
/// default stderr threshold.
fn stderr_min_severity(options: &LogOptions) -> Severity {
    if options.also_to_stderr {
        options.stderr_severity()
    } else {
        Severity::Error
    }
}

fn formatted_layer<W>(writer: W, ansi: bool, options: &LogOptions, min: Severity) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    if options.log_prefix {
        layer
            .with_thread_ids(true)
            .with_filter(severity_filter(min))
            .boxed()
    } else {
        layer
            .without_time()
            .with_filter(severity_filter(min))
            .boxed()
    }
}

/// Open one non-blocking file layer per severity; each file receives records
/// of its severity and above.
#[cfg(feature = "file")]
fn file_layers(options: &LogOptions) -> Result<Vec<(BoxedLayer, FileGuard)>> {
    let log_dir = Path::new(&options.log_dir);
    let mut layers = Vec::with_capacity(Severity::ALL.len());

    for severity in Severity::ALL {
        let writer = SeverityFileWriter::open(log_dir, &options.app_name, severity).map_err(|e| {
            Error::Init(format!(
                "cannot open {}: {}",
                SeverityFileWriter::file_path(log_dir, &options.app_name, severity).display(),
                e
            ))
        })?;
        let (non_blocking, guard) = tracing_appender::non_blocking(writer);
        layers.push((formatted_layer(non_blocking, false, options, severity), guard));
    }

    Ok(layers)
}

#[cfg(not(feature = "file"))]
fn file_layers(options: &LogOptions) -> Result<Vec<(BoxedLayer, FileGuard)>> {
    Err(Error::Init(format!(
        "log_dir `{}` ignored: built without the `file` feature",
        options.log_dir
    )))
}
