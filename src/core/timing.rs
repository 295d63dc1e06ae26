use std::time::Instant;

/// Scope timer. Emits the elapsed time as a tracing event when dropped.
pub struct LogDuration {
    label: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(label: impl Into<String>) -> Self {
        LogDuration {
            label: label.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        tracing::info!(label = %self.label, elapsed_ms = self.elapsed_ms() as u64, "operation finished");
    }
}

/// Times the rest of the enclosing scope.
#[macro_export]
macro_rules! log_duration {
    ($label:expr) => {
        let _log_duration_guard = $crate::core::timing::LogDuration::new($label);
    };
}
