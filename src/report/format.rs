//! Formatted terminal output for predictions.
//!
//! We keep formatting code in one place so:
//! - the prediction code stays clean and testable
//! - the TUI and CLI print identical figures

use crate::domain::{ExperienceRange, Level, Prediction};

/// `$1234.57` style, two decimals, no grouping. The sign follows the `$`.
pub fn fmt_currency(v: f64) -> String {
    format!("${v:.2}")
}

/// Hint shown under the level selector.
pub fn format_range_hint(level: &str, range: ExperienceRange) -> String {
    format!(
        "For {level} level, you can choose between {} and {} years of experience.",
        range.min, range.max
    )
}

pub fn format_headline(p: &Prediction) -> String {
    format!(
        "Predicted Salaries for {} years of experience, {}, {}:",
        fmt_years(p.years_of_experience),
        p.level,
        p.role
    )
}

/// Minimum, average, maximum; in that order.
pub fn format_salary_lines(p: &Prediction) -> [String; 3] {
    [
        format!("Minimum Salary: {}", fmt_currency(p.result.min)),
        format!("Average Salary: {}", fmt_currency(p.result.avg)),
        format!("Maximum Salary: {}", fmt_currency(p.result.max)),
    ]
}

/// Full text block for `salary predict`.
pub fn format_prediction(p: &Prediction) -> String {
    let mut out = String::new();
    out.push_str(&format_headline(p));
    out.push('\n');
    for line in format_salary_lines(p) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Level → experience range table for `salary levels`.
pub fn format_levels() -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>5} {:>5}\n", "level", "min", "max"));
    out.push_str(&format!("{:-<10} {:-<5} {:-<5}\n", "", "", ""));
    for level in Level::ALL {
        let r = level.experience_range();
        out.push_str(&format!("{:<10} {:>5} {:>5}\n", level.label(), r.min, r.max));
    }
    out
}

/// Role table for `salary table`.
pub fn format_table(rows: &[Prediction]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<28} {:>12} {:>12} {:>12}\n",
            "role", "min", "avg", "max"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<28} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    for p in rows {
        out.push_str(
            format!(
                "{:<28} {:>12} {:>12} {:>12}\n",
                truncate(&p.role, 28),
                fmt_currency(p.result.min),
                fmt_currency(p.result.avg),
                fmt_currency(p.result.max),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_years(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
