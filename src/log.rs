//! Provides logging utilities, used by application.

use std::io;

use chrono::Local;
use slog::{
    o, Discard, Drain, FnValue, Level, LevelFilter, Logger, PushFnValue,
    Record,
};
use slog_async::Async;
use slog_json::Json;

/// Re-exports common definitions for logging.
///
/// Use this module as following:
/// ```rust
/// use medea_widgets::log::prelude::*;
/// ```
pub mod prelude {
    pub use slog_scope::{debug, error, info, trace, warn};
}

/// Builds JSON [`Logger`] which prints all its log records of the provided
/// `level` (and higher) to `w` writer. `None` level builds a [`Logger`]
/// discarding everything.
///
/// [`Logger`] will use [`Async`] drain with channel size of 2048 entries and
/// produces log records with `fqn`, `lvl`, `time` and `msg` fields by default.
pub fn new_logger<W>(w: W, level: Option<Level>) -> Logger
where
    W: io::Write + Send + 'static,
{
    let level = match level {
        Some(level) => level,
        None => return Logger::root(Discard, o!()),
    };
    let drain = Json::new(w).build().fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let drain = Async::new(drain).chan_size(2048).build().fuse();
    add_default_keys(&Logger::root(drain, o!()))
}

/// Adds default log record data (key-value pairs) to specified [`Logger`]:
/// - `msg`: log record message.
/// - `fqn`: path to code line that called log function.
/// - `time`: creation date and time of log record in [RFC 3339] format.
/// - `lvl`: logging level of log record.
///
/// [RFC 3339]: https://www.ietf.org/rfc/rfc3339.txt
fn add_default_keys(logger: &Logger) -> Logger {
    logger.new(o!(
        "msg" => PushFnValue(move |record : &Record<'_>, ser| {
            ser.emit(record.msg())
        }),
        "fqn" => PushFnValue(move |record : &Record<'_>, ser| {
             ser.emit(format_args!("{}:{}", record.module(), record.line()))
        }),
        "time" => PushFnValue(move |_ : &Record<'_>, ser| {
            ser.emit(Local::now().to_rfc3339())
        }),
        "lvl" => FnValue(move |rinfo : &Record<'_>| {
            rinfo.level().as_short_str()
        }),
    ))
}

#[cfg(test)]
mod spec {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use slog::{info, warn, Level};

    use super::new_logger;

    /// [`io::Write`] collecting everything into a shared buffer.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_json_records_above_level() {
        let buf = Buffer::default();
        let logger = new_logger(buf.clone(), Some(Level::Warning));
        info!(logger, "skipped");
        warn!(logger, "written"; "meeting_id" => "m1");
        drop(logger);

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 1);

        let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["msg"], "written");
        assert_eq!(record["lvl"], "WARN");
        assert_eq!(record["meeting_id"], "m1");
    }

    #[test]
    fn discards_everything_when_disabled() {
        let buf = Buffer::default();
        let logger = new_logger(buf.clone(), None);
        warn!(logger, "discarded");
        drop(logger);

        assert!(buf.0.lock().unwrap().is_empty());
    }
}
