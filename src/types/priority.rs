use std::fmt;

use clap::ValueEnum;

/// Priority levels for tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Priority {
    /// Whenever (0)
    Whenever = 0,
    /// Nice to have (1)
    NiceToHave = 1,
    /// Important (2)
    Important = 2,
    /// Critical (3)
    Critical = 3,
}

impl Priority {
    /// Get the integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Whenever => "Whenever",
            Priority::NiceToHave => "Nice to Have",
            Priority::Important => "Important",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
