use batchship::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Unknown configuration keys, each with its location and a suggestion
#[derive(Debug, Clone)]
pub struct WarningBlock {
    title: String,
    lines: Vec<String>,
}

impl WarningBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn from_config_warnings(warnings: &[ConfigWarning]) -> Self {
        let mut block = Self::new("Unknown configuration keys");
        for warning in warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            let mut line = format!("'{}' ({})", warning.key, location);
            if let Some(suggestion) = &warning.suggestion {
                line.push_str(&format!(", did you mean '{}'?", suggestion));
            }
            block.add_line(line);
        }
        block
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let header = format!(
            "{} {}",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(self.title.as_str()).bold().render(supports_color)
        );
        let mut b = Box::with_title(header).style(BoxStyle::Warning);
        for line in &self.lines {
            b.add_line(line.clone());
        }
        b.render(supports_color, supports_unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_warning_lines_include_location_and_suggestion() {
        let block = WarningBlock::from_config_warnings(&[ConfigWarning {
            key: "project.remote_bse".to_string(),
            file: PathBuf::from("batchship.toml"),
            line: Some(3),
            suggestion: Some("remote_base".to_string()),
        }]);

        insta::assert_snapshot!(block.render(false, false), @r"
        +----------------------------------------------------------------------+
        | [WARN] Unknown configuration keys                                    |
        | 'project.remote_bse' (batchship.toml:3), did you mean 'remote_base'? |
        +----------------------------------------------------------------------+
        ");
    }
}
