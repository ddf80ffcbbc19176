// Plain-text rendering of the first rows of a table, for terminal previews.
use shared::models::Table;

const MAX_CELL_WIDTH: usize = 24;

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let kept: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{kept}…")
    }
}

/// Renders up to `rows` rows as aligned columns, followed by a row count line.
pub fn render_preview(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let header: Vec<String> = head.columns.iter().map(|c| clip(c)).collect();
    let body: Vec<Vec<String>> = head
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| clip(&cell.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out.push_str(&format!(
        "[{} of {} rows x {} columns]\n",
        head.len(),
        table.len(),
        table.columns.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Cell;

    #[test]
    fn renders_header_rows_and_footer() {
        let mut table = Table::new(vec!["uf".into(), "regiao_uf".into()]);
        table.push_row(vec![Cell::Text("SP".into()), Cell::Text("sudeste".into())]);
        table.push_row(vec![Cell::Null, Cell::Null]);
        table.push_row(vec![Cell::Text("RS".into()), Cell::Text("sul".into())]);

        let text = render_preview(&table, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "uf     | regiao_uf");
        assert_eq!(lines[2], "SP     | sudeste");
        assert_eq!(lines[3], "<null> | <null>");
        assert_eq!(lines[4], "[2 of 3 rows x 2 columns]");
    }

    #[test]
    fn clips_long_values() {
        let clipped = clip(&"x".repeat(40));
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with('…'));
    }
}
