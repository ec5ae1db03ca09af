use crate::error::{DisplayError, Result};
use crate::types::{DaySnapshot, PopulationSnapshot, RawSnapshotRow};
use crate::util::{parse_f64_safe, parse_i64_safe};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    /// Cells that were blank or unparseable and became NaN.
    pub missing_values: usize,
}

pub fn load_snapshots(path: impl AsRef<Path>) -> Result<(Vec<DaySnapshot>, LoadReport)> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DisplayError::file_open(path, e))?;
    info!(path = %path.display(), "loading snapshots");
    read_snapshots(rdr)
}

/// Parse snapshot rows from any reader (`day` plus the six category columns).
pub fn load_snapshots_from_reader<R: Read>(reader: R) -> Result<(Vec<DaySnapshot>, LoadReport)> {
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_snapshots(rdr)
}

fn read_snapshots<R: Read>(mut rdr: csv::Reader<R>) -> Result<(Vec<DaySnapshot>, LoadReport)> {
    let mut report = LoadReport::default();
    let mut rows: Vec<DaySnapshot> = Vec::new();

    for result in rdr.deserialize::<RawSnapshotRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(row = report.total_rows, error = %e, "skipping malformed row");
                report.parse_errors += 1;
                continue;
            }
        };

        let day = match parse_i64_safe(row.day.as_deref()) {
            Some(d) => d,
            None => {
                debug!(row = report.total_rows, "skipping row without a valid day");
                report.parse_errors += 1;
                continue;
            }
        };

        // Missing cells stay NaN so they render blank rather than as zero.
        let mut cell = |v: Option<String>| match parse_f64_safe(v.as_deref()) {
            Some(x) => x,
            None => {
                report.missing_values += 1;
                f64::NAN
            }
        };
        let snapshot = PopulationSnapshot::new(
            cell(row.susceptible),
            cell(row.infected),
            cell(row.hospitalized),
            cell(row.icu),
            cell(row.recovered),
            cell(row.fatalities),
        );
        rows.push(DaySnapshot { day, snapshot });
    }

    rows.sort_by_key(|r| r.day);
    report.loaded_rows = rows.len();
    info!(
        total = report.total_rows,
        loaded = report.loaded_rows,
        errors = report.parse_errors,
        missing = report.missing_values,
        "snapshots loaded"
    );
    Ok((rows, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
day,susceptible,infected,hospitalized,icu,recovered,fatalities
1,990,8,1,0.5,0,0.5
0,995,5,0,0,0,0
x,1,1,1,1,1,1
2,\"985,000\",,2,1,1,n/a
";

    #[test]
    fn loads_sorts_and_counts() {
        let (rows, report) = load_snapshots_from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.loaded_rows, 3);
        assert_eq!(report.parse_errors, 1);
        assert_eq!(report.missing_values, 2);
        let days: Vec<i64> = rows.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![0, 1, 2]);
        assert_eq!(rows[1].snapshot.icu(), 0.5);
    }

    #[test]
    fn blank_cells_become_nan() {
        let (rows, _) = load_snapshots_from_reader(CSV.as_bytes()).unwrap();
        let last = rows[2].snapshot;
        assert_eq!(last.susceptible(), 985000.0);
        assert!(last.infected().is_nan());
        assert!(last.fatalities().is_nan());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_snapshots("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("here.csv"));
    }
}
