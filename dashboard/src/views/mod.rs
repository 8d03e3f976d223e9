//! Master/detail views and the shell that composes them.

pub mod detail;
pub mod list;
pub mod shell;

use consumption_core::UsageLevel;

const BAR_WIDTH: usize = 20;

/// Fixed-width meter such as `[####----------------]  20.0%`, with a `!`
/// suffix once usage is critical.
pub(crate) fn progress_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let marker = match UsageLevel::from_percent(percent) {
        UsageLevel::Normal => "",
        UsageLevel::Critical => " !",
    };
    format!(
        "[{}{}] {:>5.1}%{}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent,
        marker
    )
}
