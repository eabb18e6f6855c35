use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// One row of the result table
#[derive(Debug, Clone)]
struct Row {
    ok: bool,
    label: String,
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    success: bool,
    rows: Vec<Row>,
    notes: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn new(title: impl Into<String>, success: bool) -> Self {
        Self {
            title: title.into(),
            success,
            rows: Vec::new(),
            notes: Vec::new(),
            next_step: None,
        }
    }

    pub fn add_row(&mut self, ok: bool, label: impl Into<String>, detail: impl Into<String>) {
        self.rows.push(Row {
            ok,
            label: label.into(),
            detail: detail.into(),
        });
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let icon = if self.success {
            Icon::Success
        } else {
            Icon::Warning
        };
        let title = if self.success {
            ColoredText::success(self.title.as_str())
        } else {
            ColoredText::warning(self.title.as_str())
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );

        let mut b = Box::with_title(header).style(BoxStyle::outcome(self.success));
        b.add_empty();

        let label_width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for row in &self.rows {
            b.add_line(format!(
                "{} {:<width$}  {}",
                Icon::outcome(row.ok).colored(supports_color, supports_unicode),
                row.label,
                ColoredText::outcome(row.detail.as_str(), row.ok).render(supports_color),
                width = label_width
            ));
        }

        if !self.notes.is_empty() {
            b.add_empty();
            for note in &self.notes {
                b.add_line(ColoredText::dim(note.as_str()).render(supports_color));
            }
        }

        if let Some(next_step) = &self.next_step {
            b.add_empty();
            b.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        b.render(supports_color, supports_unicode)
    }
}
