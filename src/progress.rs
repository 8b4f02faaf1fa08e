use colored::Colorize;

pub const BAR_WIDTH: usize = 30;

/// fixed-width two-segment bar, e.g. `[######------------------------]  23%`.
/// filled length is floor(completed/total * width)
pub fn render(completed: usize, total: usize, width: usize) -> String {
    let total = total.max(1);
    let completed = completed.min(total);
    let filled = completed * width / total;
    let percent = completed * 100 / total;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// print the bar with the current step label. cosmetic only
pub fn draw(completed: usize, total: usize, label: &str) {
    println!(
        "{} {}",
        render(completed, total, BAR_WIDTH).bold().cyan(),
        label
    );
}
