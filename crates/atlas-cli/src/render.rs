//! Text rendering of records and statistics.

use std::io::{self, Write};

use atlas_model::{Country, Statistics};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::settings::{DisplaySettings, OutputStyle};

pub const NO_RESULTS: &str = "(Sin resultados)";
pub const NO_DATA: &str = "No hay datos.";

/// `- <name> | Población: <population> | Superficie: <area> km² | <continent>`
pub fn format_line(country: &Country) -> String {
    format!(
        "- {} | Población: {} | Superficie: {} km² | {}",
        country.name, country.population, country.area, country.continent
    )
}

/// Group the digits of `value` in threes with commas.
pub fn group_digits(value: u64) -> String {
    group_digit_str(&value.to_string())
}

fn group_digit_str(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Two decimals, optionally with grouped integer digits.
pub fn format_decimal(value: f64, grouped: bool) -> String {
    let fixed = format!("{value:.2}");
    if !grouped {
        return fixed;
    }
    match fixed.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", group_digit_str(whole), fraction),
        None => group_digit_str(&fixed),
    }
}

fn format_count(value: u64, grouped: bool) -> String {
    if grouped {
        group_digits(value)
    } else {
        value.to_string()
    }
}

/// Print a result sequence in the configured style.
pub fn write_countries<W: Write>(
    out: &mut W,
    countries: &[&Country],
    style: OutputStyle,
) -> io::Result<()> {
    if countries.is_empty() {
        return writeln!(out, "{NO_RESULTS}");
    }
    match style {
        OutputStyle::Lines => {
            for country in countries {
                writeln!(out, "{}", format_line(country))?;
            }
            Ok(())
        }
        OutputStyle::Table => writeln!(out, "{}", country_table(countries)),
    }
}

pub fn country_table(countries: &[&Country]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("País"),
        header_cell("Población"),
        header_cell("Superficie (km²)"),
        header_cell("Continente"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for country in countries {
        table.add_row(vec![
            Cell::new(&country.name).add_attribute(Attribute::Bold),
            Cell::new(group_digits(country.population)),
            Cell::new(group_digits(country.area)),
            Cell::new(&country.continent),
        ]);
    }
    table
}

/// Print extrema, averages and counts per continent.
pub fn write_statistics<W: Write>(
    out: &mut W,
    stats: &Statistics,
    display: DisplaySettings,
) -> io::Result<()> {
    let (Some(largest), Some(smallest)) = (&stats.largest, &stats.smallest) else {
        return writeln!(out, "{NO_DATA}");
    };
    let grouped = display.thousands;
    writeln!(
        out,
        "Mayor población: {} ({})",
        largest.name,
        format_count(largest.population, grouped)
    )?;
    writeln!(
        out,
        "Menor población: {} ({})",
        smallest.name,
        format_count(smallest.population, grouped)
    )?;
    writeln!(
        out,
        "Promedio de población: {}",
        format_decimal(stats.average_population, grouped)
    )?;
    writeln!(
        out,
        "Promedio de superficie: {} km²",
        format_decimal(stats.average_area, grouped)
    )?;
    match display.style {
        OutputStyle::Lines => {
            writeln!(out, "Países por continente:")?;
            for (continent, count) in stats.by_continent.iter() {
                writeln!(out, "  - {continent}: {count}")?;
            }
        }
        OutputStyle::Table => {
            let mut table = Table::new();
            table.set_header(vec![header_cell("Continente"), header_cell("Países")]);
            apply_table_style(&mut table);
            align_column(&mut table, 1, CellAlignment::Right);
            for (continent, count) in stats.by_continent.iter() {
                table.add_row(vec![Cell::new(continent), Cell::new(count)]);
            }
            writeln!(out, "{table}")?;
        }
    }
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(45_376_763), "45,376,763");
    }

    #[test]
    fn decimals() {
        assert_eq!(format_decimal(0.0, true), "0.00");
        assert_eq!(format_decimal(1234567.891, true), "1,234,567.89");
        assert_eq!(format_decimal(1234567.891, false), "1234567.89");
        assert_eq!(format_decimal(2.5, true), "2.50");
    }
}
