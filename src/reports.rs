use crate::format::{add_days, date_label, format_count, format_delta, format_percent};
use crate::states::{category_metadata, meta_for};
use crate::types::{
    Category, DailyRow, DaySnapshot, LegendRow, ModelKind, SummaryStats, TooltipRow,
};
use crate::util::days_diff;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::debug;

/// One row per simulated day with every category formatted as a count.
pub fn generate_daily_table(first_bar_date: NaiveDate, data: &[DaySnapshot]) -> Vec<DailyRow> {
    data.iter()
        .map(|r| {
            let s = &r.snapshot;
            DailyRow {
                date: date_label(first_bar_date, r.day),
                susceptible: format_count(s.susceptible()),
                infected: format_count(s.infected()),
                hospitalized: format_count(s.hospitalized()),
                icu: format_count(s.icu()),
                recovered: format_count(s.recovered()),
                fatalities: format_count(s.fatalities()),
            }
        })
        .collect()
}

/// The chart tooltip for `day`: count, change since the previous row and
/// share of the total population, per category.
///
/// Returns an empty table when `day` is not in `data`. The delta is blank
/// for the first row since there is nothing to compare against.
pub fn generate_tooltip(data: &[DaySnapshot], day: i64) -> Vec<TooltipRow> {
    let Some(idx) = data.iter().position(|r| r.day == day) else {
        debug!(day, "no snapshot for tooltip day");
        return Vec::new();
    };
    let current = data[idx].snapshot;
    let previous = idx.checked_sub(1).map(|i| data[i].snapshot);
    let total = current.total();

    Category::ALL
        .iter()
        .map(|c| {
            let value = current.get(*c);
            let delta = previous.map_or(f64::NAN, |p| value - p.get(*c));
            let share = if total > 0.0 { value / total } else { f64::NAN };
            TooltipRow {
                title: meta_for(*c).title.to_string(),
                count: format_count(value),
                delta: format_delta(delta),
                share: format_percent(share),
            }
        })
        .collect()
}

pub fn generate_legend() -> Vec<LegendRow> {
    category_metadata()
        .iter()
        .map(|m| LegendRow {
            key: m.key.to_string(),
            title: m.title.to_string(),
            toggle: match (m.checkable, m.checked_by_default) {
                (false, _) => "fixed".to_string(),
                (true, true) => "on".to_string(),
                (true, false) => "off".to_string(),
            },
            color: m.color.to_string(),
        })
        .collect()
}

pub fn generate_summary(
    model: ModelKind,
    first_bar_date: NaiveDate,
    data: &[DaySnapshot],
) -> SummaryStats {
    let first_date = data
        .first()
        .map(|r| date_label(first_bar_date, r.day))
        .unwrap_or_default();
    let last_date = data
        .last()
        .map(|r| date_label(first_bar_date, r.day))
        .unwrap_or_default();

    // NaN days are ignored when looking for the peak.
    let peak = data
        .iter()
        .filter(|r| !r.snapshot.infected().is_nan())
        .max_by(|a, b| {
            a.snapshot
                .infected()
                .partial_cmp(&b.snapshot.infected())
                .unwrap_or(Ordering::Equal)
        });
    let (peak_infected, peak_infected_date) = match peak {
        Some(r) => (
            format_count(r.snapshot.infected()),
            date_label(first_bar_date, r.day),
        ),
        None => (String::new(), String::new()),
    };

    let span_days = match (data.first(), data.last()) {
        (Some(a), Some(b)) => days_diff(
            add_days(first_bar_date, a.day),
            add_days(first_bar_date, b.day),
        ),
        _ => 0,
    };

    let final_fatalities = data
        .last()
        .map(|r| format_count(r.snapshot.fatalities()))
        .unwrap_or_default();

    SummaryStats {
        model,
        first_date,
        last_date,
        total_days: data.len(),
        span_days,
        peak_infected,
        peak_infected_date,
        final_fatalities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PopulationSnapshot;

    fn sample() -> Vec<DaySnapshot> {
        vec![
            DaySnapshot {
                day: 0,
                snapshot: PopulationSnapshot::new(9990.0, 10.0, 0.0, 0.0, 0.0, 0.0),
            },
            DaySnapshot {
                day: 1,
                snapshot: PopulationSnapshot::new(9000.0, 800.4, 100.0, 20.0, 79.6, 0.0),
            },
            DaySnapshot {
                day: 2,
                snapshot: PopulationSnapshot::new(8000.0, 600.0, 150.0, 30.0, 1200.0, 20.0),
            },
        ]
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 2, 28).unwrap()
    }

    #[test]
    fn daily_rows_use_chart_dates() {
        let rows = generate_daily_table(start(), &sample());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "28.02.2020");
        assert_eq!(rows[2].date, "01.03.2020");
        assert_eq!(rows[0].susceptible, "9,990");
        assert_eq!(rows[1].infected, "800");
    }

    #[test]
    fn tooltip_has_delta_and_share() {
        let rows = generate_tooltip(&sample(), 2);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].title, "Susceptibles");
        assert_eq!(rows[0].count, "8,000");
        assert_eq!(rows[0].delta, "-1,000");
        assert_eq!(rows[0].share, "(80.00%)");
        assert_eq!(rows[5].title, "Muertos");
        assert_eq!(rows[5].delta, "+20");
        assert_eq!(rows[5].share, "(0.20%)");
    }

    #[test]
    fn tooltip_first_day_has_blank_delta() {
        let rows = generate_tooltip(&sample(), 0);
        assert!(rows.iter().all(|r| r.delta.is_empty()));
        assert_eq!(rows[1].share, "(0.10%)");
    }

    #[test]
    fn tooltip_unknown_day_is_empty() {
        assert!(generate_tooltip(&sample(), 42).is_empty());
    }

    #[test]
    fn legend_follows_metadata() {
        let rows = generate_legend();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].toggle, "fixed");
        assert_eq!(rows[1].toggle, "on");
        assert_eq!(rows[4].toggle, "off");
        assert_eq!(rows[3].key, "icu");
    }

    #[test]
    fn summary_finds_peak() {
        let s = generate_summary(ModelKind::Goh, start(), &sample());
        assert_eq!(s.total_days, 3);
        assert_eq!(s.span_days, 2);
        assert_eq!(s.first_date, "28.02.2020");
        assert_eq!(s.last_date, "01.03.2020");
        assert_eq!(s.peak_infected, "800");
        assert_eq!(s.peak_infected_date, "29.02.2020");
        assert_eq!(s.final_fatalities, "20");
    }

    #[test]
    fn summary_of_nothing_is_blank() {
        let s = generate_summary(ModelKind::CustomScenario, start(), &[]);
        assert_eq!(s.total_days, 0);
        assert!(s.first_date.is_empty());
        assert!(s.peak_infected.is_empty());
    }
}
