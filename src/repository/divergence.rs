//! Ahead/behind summary of a branch against its upstream

use std::fmt;

/// Commits only on the local branch (`ahead`) and only on its upstream
/// (`behind`). Displayed the way shell prompts do: `+2-1`, `+2`, `-1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Divergence {
    pub ahead: usize,
    pub behind: usize,
}

impl Divergence {
    pub fn new(ahead: usize, behind: usize) -> Self {
        Self { ahead, behind }
    }

    pub fn is_in_sync(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ahead, self.behind) {
            (0, 0) => write!(f, "0"),
            (ahead, 0) => write!(f, "+{}", ahead),
            (0, behind) => write!(f, "-{}", behind),
            (ahead, behind) => write!(f, "+{}-{}", ahead, behind),
        }
    }
}
