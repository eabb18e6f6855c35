use batchship::domain::entities::{ArtifactKind, TransferOutcome};
use batchship::presentation::{format_bytes, format_elapsed};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// One artifact line of the upload phase: `✓ run_tests.py  0.42s  1.2 KB (2.9 KB/s)`
pub fn render_transfer_line(outcome: &TransferOutcome, ui: &UiContext) -> String {
    let name = match outcome.kind {
        ArtifactKind::Directory => format!("{}/", outcome.artifact),
        ArtifactKind::File | ArtifactKind::Missing => outcome.artifact.to_string(),
    };
    let icon = Icon::outcome(outcome.transferred).colored(ui.color, ui.unicode);

    if !outcome.transferred {
        let error = outcome.error.as_deref().unwrap_or("transfer failed");
        return format!(
            "  {} {}  {}",
            icon,
            name,
            ColoredText::error(error).render(ui.color)
        );
    }

    let mut stats = format_elapsed(outcome.elapsed_secs);
    if let Some(size) = outcome.size_bytes {
        stats.push_str(&format!("  {}", format_bytes(size)));
        if let Some(rate) = format_rate(size, outcome.elapsed_secs) {
            stats.push_str(&format!(" ({})", rate));
        }
    }

    format!(
        "  {} {}  {}",
        icon,
        name,
        ColoredText::dim(stats).render(ui.color)
    )
}

fn format_rate(bytes: u64, elapsed_secs: f64) -> Option<String> {
    if bytes == 0 || elapsed_secs <= 0.0 {
        return None;
    }

    let rate = bytes as f64 / elapsed_secs;
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Some(format!("{}/s", format_bytes_rate(rate)))
}

fn format_bytes_rate(bytes_per_sec: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    if bytes_per_sec < KB {
        return format!("{:.0} B", bytes_per_sec);
    }
    if bytes_per_sec < MB {
        return format!("{:.1} KB", bytes_per_sec / KB);
    }
    if bytes_per_sec < GB {
        return format!("{:.1} MB", bytes_per_sec / MB);
    }
    format!("{:.1} GB", bytes_per_sec / GB)
}
