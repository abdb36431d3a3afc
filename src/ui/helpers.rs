use anyhow::Error;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rect of the requested size centered inside `area`, clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(horizontal);
    vertical
}

/// Reduce an error chain to the innermost message, which is the one worth a
/// single status line.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Shorten a string to at most `max` characters, appending an ellipsis when
/// anything was cut.
pub(crate) fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context, Result};

    #[test]
    fn surfaces_the_root_cause() {
        let err: Result<()> = Err(anyhow!("disk full")).context("failed to save teacher");
        assert_eq!(surface_error(&err.unwrap_err()), "disk full");
    }

    #[test]
    fn truncates_long_text_with_ellipsis() {
        assert_eq!(truncate_text("Преподаватель вокала", 10), "Преподава…");
        assert_eq!(truncate_text("Вокал", 10), "Вокал");
    }
}
