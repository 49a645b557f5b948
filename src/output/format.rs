use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::cli::SortOrder;
use crate::consts::NO_DATA;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = locale else {
            return Ok(NumberFormat::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(NumberFormat::default());
        }
        let base = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        let format = match base.as_str() {
            "de" => NumberFormat {
                group_sep: '.',
                decimal_sep: ',',
            },
            "fr" | "ru" => NumberFormat {
                group_sep: ' ',
                decimal_sep: ',',
            },
            "en" | "zh" => NumberFormat::default(),
            _ => {
                return Err(AppError::UnsupportedLocale {
                    input: trimmed.to_string(),
                });
            }
        };

        Ok(format)
    }
}

/// Options shared by every table renderer
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
    pub(crate) order: SortOrder,
}

impl TableOptions {
    pub(crate) fn accent(&self) -> Option<Color> {
        self.use_color.then_some(Color::Cyan)
    }

    pub(crate) fn highlight(&self) -> Option<Color> {
        self.use_color.then_some(Color::Green)
    }
}

pub(super) fn format_number(n: u64, format: NumberFormat) -> String {
    let digits = n.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(format.group_sep);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Two-decimal number with locale separators
pub(super) fn format_decimal(value: f64, format: NumberFormat) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let int_value: u64 = int_part.parse().unwrap_or(0);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!(
        "{sign}{}{}{frac_part}",
        format_number(int_value, format),
        format.decimal_sep
    )
}

/// Mean of a group, or a placeholder when the group was empty
pub(super) fn format_mean(mean: Option<f64>, format: NumberFormat) -> String {
    match mean {
        Some(m) => format_decimal(m, format),
        None => NO_DATA.to_string(),
    }
}

/// Share of `part` in `whole` as a percentage with one decimal
pub(super) fn format_share(part: u64, whole: u64, format: NumberFormat) -> String {
    if whole == 0 {
        return "-".to_string();
    }
    let pct = format!("{:.1}%", part as f64 * 100.0 / whole as f64);
    if format.decimal_sep == '.' {
        pct
    } else {
        pct.replace('.', &format.decimal_sep.to_string())
    }
}

pub(super) fn mean_json_value(mean: Option<f64>) -> serde_json::Value {
    match mean {
        Some(m) if m.is_finite() => serde_json::json!(m),
        _ => serde_json::Value::Null,
    }
}

/// Apply the requested order to rows that arrive in ascending order
pub(super) fn ordered<T>(mut rows: Vec<T>, order: SortOrder) -> Vec<T> {
    if order == SortOrder::Desc {
        rows.reverse();
    }
    rows
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    styled_cell(text, color, bold).set_alignment(CellAlignment::Right)
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table(headers: &[&str], use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table.set_header(headers.iter().map(|h| header_cell(h, use_color)));
    table
}
