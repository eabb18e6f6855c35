use batchship::domain::entities::{ArtifactKind, ArtifactPreview, PlanPreview};
use batchship::presentation::format_bytes;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Dry-run output: every artifact with its local state and remote destination
pub fn render_plan(preview: &PlanPreview, ui: &UiContext) -> String {
    let (color, unicode) = (ui.color, ui.unicode);

    let mut header = CommandHeader::new(Icon::Plan, "Batchship Dry Run");
    header.add("Target", format!("{} ({})", preview.target, preview.host));
    header.add("Remote", preview.remote_base.as_str());
    let mut out = header.render(color, unicode);

    let name_width = preview
        .batches
        .iter()
        .flat_map(|b| b.artifacts.iter())
        .map(|a| display_name(a).len())
        .max()
        .unwrap_or(0);

    let total = preview.batches.len();
    for (index, batch) in preview.batches.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            ColoredText::info(format!("[{}/{}]", index + 1, total)).render(color),
            ColoredText::plain(batch.display_name.as_str())
                .bold()
                .render(color)
        ));

        for artifact in &batch.artifacts {
            let name = format!("{:<width$}", display_name(artifact), width = name_width);
            let line = if artifact.exists() {
                format!(
                    "  {} {}  {}",
                    Icon::Success.colored(color, unicode),
                    name,
                    ColoredText::dim(format!(
                        "{} -> {}",
                        local_detail(artifact),
                        artifact.remote_path
                    ))
                    .render(color)
                )
            } else {
                format!(
                    "  {} {}  {}",
                    Icon::Error.colored(color, unicode),
                    name,
                    ColoredText::error("missing locally").render(color)
                )
            };
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out.push('\n');
    let missing = preview.missing_count();
    let summary = format!(
        "{} artifacts in {} batches, {} missing. Nothing was transferred.",
        preview.artifact_count(),
        total,
        missing
    );
    out.push_str(&ColoredText::outcome(summary, missing == 0).render(color));
    out.push('\n');
    out
}

fn display_name(artifact: &ArtifactPreview) -> String {
    match artifact.kind {
        ArtifactKind::Directory => format!("{}/", artifact.artifact),
        ArtifactKind::File | ArtifactKind::Missing => artifact.artifact.to_string(),
    }
}

fn local_detail(artifact: &ArtifactPreview) -> String {
    match (artifact.kind, artifact.file_count, artifact.size_bytes) {
        (ArtifactKind::Directory, Some(files), Some(bytes)) => {
            format!("{} files, {}", files, format_bytes(bytes))
        }
        (ArtifactKind::Directory, Some(files), None) => format!("{} files", files),
        (_, _, Some(bytes)) => format_bytes(bytes),
        _ => String::new(),
    }
}
