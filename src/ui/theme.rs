use crossterm::style::Color;

/// Design tokens for the batchship console UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and borders must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";

    // Command identifiers (used in headers).
    pub const DEPLOY: &str = "📦";
    pub const REMOTE: &str = "📡";
    pub const HEALTH: &str = "♥";
    pub const PLAN: &str = "≡";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";

    pub const DEPLOY: &str = "[DEPLOY]";
    pub const REMOTE: &str = "[REMOTE]";
    pub const HEALTH: &str = "[HEALTH]";
    pub const PLAN: &str = "[PLAN]";
}

pub mod borders {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
}

pub mod borders_ascii {
    pub const TOP_LEFT: &str = "+";
    pub const TOP_RIGHT: &str = "+";
    pub const BOTTOM_LEFT: &str = "+";
    pub const BOTTOM_RIGHT: &str = "+";
    pub const HORIZONTAL: &str = "-";
    pub const VERTICAL: &str = "|";
}

/// One complete set of box-drawing characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

pub fn border_set(supports_unicode: bool) -> BorderSet {
    if supports_unicode {
        BorderSet {
            top_left: borders::TOP_LEFT,
            top_right: borders::TOP_RIGHT,
            bottom_left: borders::BOTTOM_LEFT,
            bottom_right: borders::BOTTOM_RIGHT,
            horizontal: borders::HORIZONTAL,
            vertical: borders::VERTICAL,
        }
    } else {
        BorderSet {
            top_left: borders_ascii::TOP_LEFT,
            top_right: borders_ascii::TOP_RIGHT,
            bottom_left: borders_ascii::BOTTOM_LEFT,
            bottom_right: borders_ascii::BOTTOM_RIGHT,
            horizontal: borders_ascii::HORIZONTAL,
            vertical: borders_ascii::VERTICAL,
        }
    }
}
