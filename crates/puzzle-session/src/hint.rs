//! Hint bubble state.

pub const PROMPT: &str = "Need a hint?";
pub const THINKING: &str = "Hmmm...";
pub const ENCOURAGEMENT: &str = "Great job! Keep going!";
pub const REJECTION: &str = "Try again!";
pub const CONGRATULATIONS: &str = "Congratulations! You completed the puzzle!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HintState {
    #[default]
    Idle,
    /// A hint request is in flight; further requests are refused.
    Loading { request: u64 },
    /// Hint text or move feedback.
    Text(String),
    /// The last hint request failed.
    Error(String),
}

impl HintState {
    pub fn is_loading(&self) -> bool {
        matches!(self, HintState::Loading { .. })
    }

    /// Text to show in the hint bubble.
    pub fn display(&self) -> &str {
        match self {
            HintState::Idle => PROMPT,
            HintState::Loading { .. } => THINKING,
            HintState::Text(text) | HintState::Error(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(HintState::Idle.display(), "Need a hint?");
        assert_eq!(HintState::Loading { request: 3 }.display(), "Hmmm...");
        assert_eq!(HintState::Error("offline".into()).display(), "offline");
        assert!(HintState::Loading { request: 1 }.is_loading());
        assert!(!HintState::Text("x".into()).is_loading());
    }
}
