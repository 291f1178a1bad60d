//! Application-wide logging
//!
//! Console output goes through `env_logger`. A `--log-file` switches the
//! global logger to a file-backed implementation of `log::Log` that also
//! echoes to stdout, and commands use the same type to record their own
//! summaries.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// File-backed logger
pub struct Logger {
    /// File handle for log output; `None` keeps records on the console only
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: Level,
}

impl Logger {
    /// Creates a logger that writes to a file
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file; it is truncated
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: Level::Debug,
        })
    }

    /// Creates a logger that appends to an existing log file
    ///
    /// Used when the global logger shares the file a command logger
    /// already opened.
    pub fn append(log_file: &str) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: Level::Debug,
        })
    }

    /// Creates a logger with no file behind it
    pub fn console_only() -> Self {
        Logger {
            file: Mutex::new(None),
            level: Level::Info,
        }
    }

    /// Limit the records this logger accepts
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Whether records are being written to a file
    pub fn has_file(&self) -> bool {
        self.file.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Logs a message to the log file
    ///
    /// Does nothing for a console-only logger.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Install a file logger as the global `log` backend
    ///
    /// The file is opened for appending, so records land after anything a
    /// command logger on the same path has written.
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    /// * `verbose` - Include debug records
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let level = if verbose { Level::Debug } else { Level::Info };
        let global_logger = Logger::append(log_file)?.with_level(level);

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    /// Install `env_logger` as the global `log` backend
    ///
    /// `RUST_LOG` still overrides the level chosen here.
    pub fn init_console_logger(verbose: bool) {
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
        let result = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .parse_default_env()
            .try_init();

        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            println!("{}", message);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_logger_writes_lines() {
        let path = std::env::temp_dir().join("ixmaps-logger-test.log");
        let path_str = path.to_string_lossy().to_string();
        let logger = Logger::new(&path_str).unwrap();
        assert!(logger.has_file());
        logger.log("first").unwrap();
        logger.log("second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_append_keeps_existing_lines() {
        let path = std::env::temp_dir().join("ixmaps-logger-append-test.log");
        let path_str = path.to_string_lossy().to_string();
        Logger::new(&path_str).unwrap().log("from command").unwrap();
        Logger::append(&path_str).unwrap().log("from global").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "from command\nfrom global\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_console_only_logger_accepts_messages() {
        let logger = Logger::console_only();
        assert!(!logger.has_file());
        assert!(logger.log("dropped").is_ok());
    }

    #[test]
    fn test_level_filter() {
        let logger = Logger::console_only().with_level(Level::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(Log::enabled(&logger, &warn));
        assert!(!Log::enabled(&logger, &info));
    }
}
