use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, min_level: LogLevel) -> Self {
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn format_line(&self, level: LogLevel, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!(
                "[{}][{}][{}][{}:{}] {}",
                timestamp, level.tag(), prefix, file_name, line, message
            ),
            None => format!(
                "[{}][{}][{}:{}] {}",
                timestamp, level.tag(), file_name, line, message
            ),
        }
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if self.enabled(level) {
            eprintln!("{}", self.format_line(level, file, line, message));
        }
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
    LOGGER.get_or_init(|| Logger::new(prefix, min_level));
}

pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, file!(), line!(), &format!($($arg)*))
    };
}
