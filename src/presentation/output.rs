//! Output Formatting
//!
//! Format-independent helpers shared by the text views.

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Human-readable byte count (`1.5 MB`)
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        return format!("{} B", bytes);
    }
    if b < MB {
        return format!("{:.1} KB", b / KB);
    }
    if b < GB {
        return format!("{:.1} MB", b / MB);
    }
    format!("{:.1} GB", b / GB)
}

/// Elapsed seconds with two decimals (`0.42s`)
pub fn format_elapsed(secs: f64) -> String {
    if secs >= 60.0 {
        let whole = secs as u64;
        return format!("{}m{:02}s", whole / 60, whole % 60);
    }
    format!("{:.2}s", secs)
}
