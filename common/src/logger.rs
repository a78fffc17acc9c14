use std::io::Write;
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Writes to stderr so stdout stays free for the board.
pub struct Logger {
    prefix: Option<String>,
    enabled: bool,
}

impl Logger {
    fn new(prefix: Option<String>, enabled: bool) -> Self {
        Self { prefix, enabled }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        if !self.enabled {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let mut stderr = std::io::stderr().lock();
        let _ = if let Some(ref prefix) = self.prefix {
            writeln!(stderr, "[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            writeln!(stderr, "[{}][{}:{}] {}", timestamp, file_name, line, message)
        };
    }
}

/// Only the first call takes effect.
pub fn init_logger(prefix: Option<String>, enabled: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, enabled));
}

/// Messages logged before `init_logger` are dropped.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
