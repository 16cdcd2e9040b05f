//! Elapsed-time counter for a puzzle attempt.

/// Seconds spent on the current attempt. Advanced by one per timer tick while
/// running; solving the puzzle stops it and only a reset restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    elapsed_seconds: u64,
    running: bool,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            elapsed_seconds: 0,
            running: true,
        }
    }
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one second. Returns whether the clock advanced.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_seconds += 1;
        }
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zero the counter and start counting again.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// `H:MM:SS` once an hour has passed, `MM:SS` before that.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
