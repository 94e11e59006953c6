//! Plain-text table rendering of report rows

use colored::Colorize;

use crate::report::builder::{ReportRow, RowTier};
use crate::version::checker::Severity;
use crate::version::semver::SemanticVersion;

const COLUMN_COUNT: usize = 6;

pub const COLUMNS: [&str; COLUMN_COUNT] =
    ["Package", "Project", "Current", "Wanted", "Stable", "Latest"];

type Cells = [String; COLUMN_COUNT];

fn row_cells(row: &ReportRow) -> Cells {
    let status = &row.status;
    let optional = |v: Option<&SemanticVersion>| v.map(|v| v.to_string()).unwrap_or_default();

    [
        status.declared.name.clone(),
        status.declared.project.clone(),
        status.declared.current_version.to_string(),
        status.wanted_version.to_string(),
        optional(status.stable_version.as_ref()),
        optional(status.latest_version.as_ref()),
    ]
}

fn paint(text: &str, tier: Option<RowTier>) -> String {
    match tier {
        None | Some(RowTier::Severity(Severity::UpToDate)) => text.to_string(),
        Some(RowTier::Severity(Severity::MinorUpgrade)) => text.yellow().to_string(),
        Some(RowTier::Severity(Severity::StabilizationAvailable | Severity::MajorUpgrade)) => {
            text.truecolor(255, 165, 0).to_string()
        }
        Some(RowTier::Inconsistent) => text.red().to_string(),
    }
}

fn format_line(cells: &Cells, widths: &[usize; COLUMN_COUNT], tier: Option<RowTier>) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        let padded = format!("{:<width$}", cell, width = *width);
        line.push_str(" | ");
        line.push_str(&paint(&padded, tier));
    }
    line.push_str(" |\n");
    line
}

/// Render rows as a table with a header and a divider line.
///
/// With `use_color`, each row is colored by its tier: yellow for minor
/// upgrades, orange for major upgrades and stabilizations, red for
/// inconsistent versions.
pub fn render_table(rows: &[ReportRow], use_color: bool) -> String {
    let header: Cells = COLUMNS.map(String::from);
    let cells: Vec<Cells> = rows.iter().map(row_cells).collect();

    let mut widths = COLUMNS.map(|column| column.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = format_line(&header, &widths, None);
    let divider_len = widths.iter().map(|w| w + 3).sum::<usize>() - 1;
    table.push_str(&format!(" |{}|\n", "-".repeat(divider_len)));

    for (row, cells) in rows.iter().zip(&cells) {
        let tier = use_color.then(|| row.tier());
        table.push_str(&format_line(cells, &widths, tier));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::DeclaredPackage;
    use crate::version::checker::resolve_status;
    use crate::version::types::VersionCatalog;

    fn row(name: &str, current: &str, project: &str, catalog: &[&str], inconsistent: bool) -> ReportRow {
        let declared = DeclaredPackage::new(name, SemanticVersion::parse(current).unwrap(), project);
        let catalog = VersionCatalog::new(
            name,
            catalog
                .iter()
                .map(|v| SemanticVersion::parse(v).unwrap())
                .collect(),
        );
        ReportRow {
            status: resolve_status(&declared, &catalog),
            inconsistent,
        }
    }

    #[test]
    fn render_table_pads_columns_to_widest_cell() {
        let rows = vec![
            row("Dapper", "2.1.28", "Data", &["2.1.28"], false),
            row(
                "Microsoft.Extensions.Logging",
                "7.0.0",
                "Api",
                &["8.0.0", "7.0.1"],
                false,
            ),
        ];

        let table = render_table(&rows, false);

        let expected = concat!(
            " | Package                      | Project | Current | Wanted | Stable | Latest |\n",
            " |-----------------------------------------------------------------------------|\n",
            " | Dapper                       | Data    | 2.1.28  | 2.1.28 | 2.1.28 | 2.1.28 |\n",
            " | Microsoft.Extensions.Logging | Api     | 7.0.0   | 7.0.1  | 8.0.0  | 8.0.0  |\n",
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn render_table_leaves_missing_versions_blank() {
        let rows = vec![row("Internal.Pkg", "1.0.0", "App", &[], false)];

        let table = render_table(&rows, false);

        assert_eq!(
            table.lines().nth(2),
            Some(" | Internal.Pkg | App     | 1.0.0   | 1.0.0  |        |        |")
        );
    }

    #[test]
    fn render_table_without_rows_prints_header_only() {
        let table = render_table(&[], false);

        assert_eq!(table.lines().count(), 2);
        assert!(table.starts_with(" | Package | Project |"));
    }

    #[test]
    fn paint_without_tier_returns_text_unchanged() {
        assert_eq!(paint("Serilog ", None), "Serilog ");
        assert_eq!(
            paint("Serilog ", Some(RowTier::Severity(Severity::UpToDate))),
            "Serilog "
        );
    }
}
