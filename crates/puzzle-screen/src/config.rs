//! Screen timing configuration from environment variables

use std::env;
use std::time::Duration;

use puzzle_session::ReplyDelay;

#[derive(Clone, Debug)]
pub struct ScreenConfig {
    /// Pause before the puzzle's setup move is played
    pub opening_delay: Duration,

    /// Pause before the opponent answers a correct move
    pub reply_delay: Duration,

    /// Session clock resolution
    pub tick: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            opening_delay: Duration::from_millis(500),
            reply_delay: Duration::from_millis(700),
            tick: Duration::from_secs(1),
        }
    }
}

impl ScreenConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            opening_delay: millis_from_env("OPENING_DELAY_MS").unwrap_or(defaults.opening_delay),
            reply_delay: millis_from_env("REPLY_DELAY_MS").unwrap_or(defaults.reply_delay),
            tick: defaults.tick,
        }
    }

    pub fn delay_for(&self, delay: ReplyDelay) -> Duration {
        match delay {
            ReplyDelay::Opening => self.opening_delay,
            ReplyDelay::Reply => self.reply_delay,
        }
    }
}

fn millis_from_env(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}
