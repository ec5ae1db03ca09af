use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

/// Markdown rendering of the first `max_rows` rows, or `(no rows)`.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::generate_legend;
    use crate::states::category_metadata;

    #[test]
    fn markdown_preview_is_truncated() {
        let table = render_table(&generate_legend(), 2);
        assert!(table.contains("| Key"));
        assert!(table.contains("susceptible"));
        assert!(table.contains("infected"));
        assert!(!table.contains("hospitalized"));
    }

    #[test]
    fn empty_preview() {
        let rows: Vec<crate::types::LegendRow> = Vec::new();
        assert_eq!(render_table(&rows, 5), "(no rows)");
    }

    #[test]
    fn writes_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("meta.json");
        write_json(&json_path, category_metadata()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 6);

        let csv_path = dir.path().join("legend.csv");
        write_csv(&csv_path, &generate_legend()).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("key,title,toggle,color"));
    }
}
