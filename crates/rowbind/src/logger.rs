use std::time::{Duration, Instant};

use log::LevelFilter;
use tracing::Level;

#[derive(Clone, Debug)]
#[non_exhaustive]
/// Logging configuration for statements.
pub struct LogSettings {
    /// Log level for statements.
    pub statements_level: LevelFilter,
    /// Log level for slow statements.
    pub slow_statements_level: LevelFilter,
    /// Threshold for slow statements.
    pub slow_statements_duration: Duration,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            statements_level: LevelFilter::Debug,
            slow_statements_level: LevelFilter::Warn,
            slow_statements_duration: Duration::from_secs(1),
        }
    }
}

impl LogSettings {
    /// Configure statement logging level.
    pub fn log_statements(&mut self, level: LevelFilter) {
        self.statements_level = level;
    }

    /// Configure slow statement logging level and threshold.
    pub fn log_slow_statements(&mut self, level: LevelFilter, duration: Duration) {
        self.slow_statements_level = level;
        self.slow_statements_duration = duration;
    }

    /// Returns `true` if any logging level is enabled.
    pub fn is_enabled(&self) -> bool {
        self.statements_level != LevelFilter::Off || self.slow_statements_level != LevelFilter::Off
    }
}

fn levels(filter: LevelFilter) -> Option<(Level, log::Level)> {
    let tracing_level = match filter {
        LevelFilter::Error => Some(Level::ERROR),
        LevelFilter::Warn => Some(Level::WARN),
        LevelFilter::Info => Some(Level::INFO),
        LevelFilter::Debug => Some(Level::DEBUG),
        LevelFilter::Trace => Some(Level::TRACE),
        LevelFilter::Off => None,
    };

    tracing_level.zip(filter.to_level())
}

// `tracing::event!` needs the level as a constant, hence one arm per level.
macro_rules! emit_statement_event {
    ($level:expr, $($field:tt)+) => {
        match $level {
            Level::ERROR => tracing::event!(target: "query", Level::ERROR, $($field)+),
            Level::WARN => tracing::event!(target: "query", Level::WARN, $($field)+),
            Level::INFO => tracing::event!(target: "query", Level::INFO, $($field)+),
            Level::DEBUG => tracing::event!(target: "query", Level::DEBUG, $($field)+),
            Level::TRACE => tracing::event!(target: "query", Level::TRACE, $($field)+),
        }
    };
}

fn tracing_enabled_for(level: Level) -> bool {
    match level {
        Level::ERROR => tracing::enabled!(target: "query", Level::ERROR),
        Level::WARN => tracing::enabled!(target: "query", Level::WARN),
        Level::INFO => tracing::enabled!(target: "query", Level::INFO),
        Level::DEBUG => tracing::enabled!(target: "query", Level::DEBUG),
        Level::TRACE => tracing::enabled!(target: "query", Level::TRACE),
    }
}

/// Tracks one statement from preparation until it is finalized, then logs it.
pub struct QueryLogger {
    sql: String,
    rows_returned: u64,
    start: Instant,
    settings: LogSettings,
}

impl QueryLogger {
    pub fn new(sql: String, settings: LogSettings) -> Self {
        Self {
            sql,
            rows_returned: 0,
            start: Instant::now(),
            settings,
        }
    }

    pub fn increment_rows_returned(&mut self) {
        self.rows_returned += 1;
    }

    /// Emit a log event for the statement.
    pub fn finish(&self) {
        if !self.settings.is_enabled() {
            return;
        }

        let elapsed = self.start.elapsed();
        let level = if elapsed >= self.settings.slow_statements_duration {
            self.settings.slow_statements_level
        } else {
            self.settings.statements_level
        };

        let Some((tracing_level, log_level)) = levels(level) else {
            return;
        };

        // The enabled level could be set from either tracing world or log world, so check both
        // to see if logging should be enabled for our level.
        if !log::log_enabled!(target: "query", log_level) && !tracing_enabled_for(tracing_level) {
            return;
        }

        let (summary, sql) = self.build_log_payload();

        emit_statement_event!(
            tracing_level,
            summary = summary.as_str(),
            db.statement = sql.as_str(),
            rows_returned = self.rows_returned,
            ?elapsed,
        );
    }

    /// Build the summary line and, for statements longer than the summary, the formatted SQL.
    fn build_log_payload(&self) -> (String, String) {
        let mut summary = parse_query_summary(&self.sql);
        if summary == self.sql {
            return (summary, String::new());
        }

        summary.push_str(" …");
        let formatted = sqlformat::format(
            &self.sql,
            &sqlformat::QueryParams::None,
            &sqlformat::FormatOptions::default(),
        );
        (summary, format!("\n\n{formatted}\n"))
    }
}

impl Drop for QueryLogger {
    fn drop(&mut self) {
        self.finish();
    }
}

/// The first four words of a statement.
fn parse_query_summary(sql: &str) -> String {
    sql.split_whitespace()
        .take(4)
        .collect::<Vec<&str>>()
        .join(" ")
}
