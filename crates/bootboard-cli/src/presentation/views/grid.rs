use std::fmt;

use bootboard_engine::BadgeCategory;
use bootboard_engine::Markup;
use bootboard_engine::render::text::truncate;
use owo_colors::Style;

use super::TextStyle;

const GAP: usize = 2;
const MIN_COLUMN: usize = 5;

/// Text-only projection of a display cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlainCell {
    pub text: String,
    pub badge: Option<BadgeCategory>,
}

impl PlainCell {
    pub fn from_markup(markup: &Markup) -> Self {
        if let Some(category) = BadgeCategory::from_markup(markup) {
            return Self {
                text: category.short_label().to_string(),
                badge: Some(category),
            };
        }

        let text = markup.text_content();
        Self {
            text: if text.trim().is_empty() {
                "-".to_string()
            } else {
                text
            },
            badge: None,
        }
    }
}

fn badge_style(category: BadgeCategory) -> Style {
    match category {
        BadgeCategory::Success => Style::new().green(),
        BadgeCategory::Failure => Style::new().red().bold(),
        BadgeCategory::Offline => Style::new().cyan(),
        BadgeCategory::Unknown => Style::new().yellow(),
    }
}

/// Natural column widths, narrowed widest-first until the grid fits `max_width`.
fn column_widths(headers: &[&str], rows: &[Vec<PlainCell>], max_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let gaps = GAP * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some((idx, widest)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= MIN_COLUMN {
            break;
        }
        widths[idx] = widest - 1;
    }
    widths
}

pub(crate) fn write_grid(
    f: &mut fmt::Formatter<'_>,
    style: TextStyle,
    headers: &[&str],
    rows: &[Vec<PlainCell>],
) -> fmt::Result {
    let widths = column_widths(headers, rows, style.width);
    let gap = " ".repeat(GAP);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(&header.to_uppercase(), *width), *width))
        .collect::<Vec<_>>()
        .join(&gap);
    writeln!(f, "{}", style.bold(header_line.trim_end()))?;

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let text = pad(&truncate(&cell.text, *width), *width);
                match cell.badge {
                    Some(category) => style.paint(&text, badge_style(category)),
                    None => text,
                }
            })
            .collect::<Vec<_>>()
            .join(&gap);
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> PlainCell {
        PlainCell {
            text: text.to_string(),
            badge: None,
        }
    }

    #[test]
    fn test_widths_fit_content() {
        let rows = vec![vec![cell("mainline"), cell("v4.9")]];
        assert_eq!(column_widths(&["Tree", "Kernel"], &rows, 120), vec![8, 6]);
    }

    #[test]
    fn test_widest_column_shrinks_first() {
        let rows = vec![vec![cell(&"x".repeat(40)), cell("short")]];
        let widths = column_widths(&["A", "B"], &rows, 30);
        assert_eq!(widths, vec![23, 5]);
    }

    #[test]
    fn test_badge_cells_use_status_words() {
        let badge = BadgeCategory::Failure.badge();
        assert_eq!(PlainCell::from_markup(&badge).text, "FAIL");
        assert_eq!(PlainCell::from_markup(&Markup::Empty).text, "-");
    }
}
