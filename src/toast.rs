//! Toast notifications: short, timed messages whose colour follows the
//! outcome they report.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use serde::Serialize;

pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastCategory {
    Error,
    Success,
    #[default]
    Info,
}

impl ToastCategory {
    /// Parse a free-form category tag. Only the exact, case-sensitive tags
    /// `error` and `success` are recognised; everything else is `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "error" => ToastCategory::Error,
            "success" => ToastCategory::Success,
            _ => ToastCategory::Info,
        }
    }

    /// CSS background for the toast.
    pub fn background(self) -> &'static str {
        match self {
            ToastCategory::Error => "linear-gradient(to right, #A71D31, #3F0D12)",
            ToastCategory::Success => "linear-gradient(to right, #56ab2f, #a8e063)",
            ToastCategory::Info => "linear-gradient(to right, #3a7bd5, #3737e0)",
        }
    }

    /// First gradient stop, used as the terminal colour.
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            ToastCategory::Error => (0xA7, 0x1D, 0x31),
            ToastCategory::Success => (0x56, 0xab, 0x2f),
            ToastCategory::Info => (0x3a, 0x7b, 0xd5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub text: String,
    pub category: ToastCategory,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    pub new_window: bool,
    pub close: bool,
    pub gravity: &'static str,
    pub position: &'static str,
    pub stop_on_focus: bool,
    pub background: &'static str,
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl Toast {
    pub fn new(message: impl Into<String>, category: ToastCategory) -> Self {
        Self {
            text: message.into(),
            category,
            duration: TOAST_DURATION,
            new_window: true,
            close: false,
            gravity: "top",
            position: "center",
            stop_on_focus: true,
            background: category.background(),
        }
    }

    /// Render for a terminal of the given width, centred like the page toast.
    pub fn render(&self, width: usize) -> ColoredString {
        let (r, g, b) = self.category.rgb();
        let label = format!(" {} ", self.text);
        let padding = width.saturating_sub(label.chars().count()) / 2;
        format!("{}{}", " ".repeat(padding), label)
            .white()
            .bold()
            .on_truecolor(r, g, b)
    }

    pub fn show(&self) {
        if crate::output::is_quiet() && self.category != ToastCategory::Error {
            return;
        }
        eprintln!("{}", self.render(crate::output::terminal_width()));
    }
}

/// Build and show a toast. Never fails.
pub fn flash_toast(message: &str, category: ToastCategory) {
    Toast::new(message, category).show();
}
