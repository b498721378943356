//! Process-wide tracing setup for the command-line front end.
//!
//! Log records go to stderr so stdout carries nothing but the calculation
//! result. A second layer writes to a file once [`enable_file_logging`] is
//! called. Both sit under one level filter; stderr output can be switched
//! off on its own.

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "warn,retire_cli=info";

// --- Formatter ---

/// `2025-05-14T14:30:00.123456+02:00  WARN submission.rs:120 message`
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };
        let reset = paint("\x1b[0m");

        write!(
            writer,
            "{}{}{reset} ",
            paint("\x1b[2m"),
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f%:z")
        )?;

        let level_color = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        write!(writer, "{}{:>5}{reset} ", paint(level_color), meta.level())?;

        if let (Some(file), Some(line)) = (meta.file().map(short_source_path), meta.line()) {
            write!(writer, "{}{file}:{line}{reset} ", paint("\x1b[36m"))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Drops the crate prefix so `retire-core/src/submission.rs` and
/// `src/submission.rs` both print as `submission.rs`.
fn short_source_path(file: &str) -> &str {
    let unix = file.rsplit_once("src/").map(|(_, rest)| rest);
    let windows = || file.rsplit_once("src\\").map(|(_, rest)| rest);
    unix.or_else(windows).unwrap_or(file)
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer that discards output until a file is attached.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

fn lock_slot(slot: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    // A panic mid-write leaves the file usable.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_slot(&self.0))
    }
}

// --- Statics ---

type SetBoolFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

static SET_STDERR_ENABLED: OnceLock<SetBoolFn> = OnceLock::new();
static FILE_SLOT: OnceLock<SharedFile> = OnceLock::new();

/// Builds the level filter. An explicit `level` wins over `RUST_LOG`,
/// which wins over [`DEFAULT_FILTER`].
///
/// Accepts a bare level ("error", "warn", "info", "debug", "trace") or any
/// `EnvFilter` directive.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level.map(str::trim).filter(|l| !l.is_empty()) {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn store_stderr_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_STDERR_ENABLED.set(Box::new(move |enabled: bool| {
        // The global level filter stays the ceiling either way.
        let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
        handle
            .reload(filter)
            .map_err(|e| anyhow!("stderr reload failed: {e}"))
    }));
}

// --- Public API ---

/// Shows or hides stderr log output without affecting file logging.
pub fn set_stderr_enabled(enabled: bool) -> Result<()> {
    match SET_STDERR_ENABLED.get() {
        Some(f) => f(enabled),
        None => bail!("logging not yet initialized"),
    }
}

/// Starts appending log output to `path`, replacing any file already open.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *lock_slot(slot) = Some(file);
            Ok(())
        }
        None => bail!("logging not yet initialized"),
    }
}

/// Installs the global subscriber. Call once at startup; later calls are
/// no-ops.
///
/// # Errors
/// Fails only when `level` is not a valid filter directive.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = build_filter(level)?;

    let file_inner: SharedFile = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(file_inner.clone());

    let (stderr_gate, stderr_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(stderr_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner));

    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_stderr_handle(stderr_handle);
    }
    Ok(())
}
