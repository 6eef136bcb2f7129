//! Label text measurement and wrapping.

/// Measures rendered text.
///
/// Layout only needs widths; the host supplies a provider backed by its
/// rendering surface, tests use [`FixedWidthMetrics`].
pub trait TextMetrics {
    /// Width of `text` set at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Deterministic metrics: every character is `font_size * char_width_ratio`
/// wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMetrics {
    pub char_width_ratio: f64,
}

impl FixedWidthMetrics {
    pub fn new(char_width_ratio: f64) -> Self {
        Self { char_width_ratio }
    }
}

impl Default for FixedWidthMetrics {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMetrics for FixedWidthMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.char_width_ratio
    }
}

/// Greedy word wrap. Explicit newlines always break; a single word wider
/// than `max_width` gets a line of its own.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font_size: f64,
    metrics: &dyn TextMetrics,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && metrics.text_width(&candidate, font_size) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
