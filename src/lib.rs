//! Presentation helpers for epidemic-model charts.
//!
//! - [`types`] / [`states`]: the per-day population snapshot and the legend
//!   metadata for its six categories.
//! - [`format`]: count, delta, percentage and date formatting used by chart
//!   labels and tooltips.
//! - [`math`]: KaTeX rendering of annotation formulas.
//! - [`loader`], [`reports`], [`output`]: the CSV-to-table pipeline behind
//!   the `epi_display` binary.

pub mod error;
pub mod format;
pub mod loader;
pub mod math;
pub mod output;
pub mod reports;
pub mod states;
pub mod types;
pub mod util;

pub use error::{DisplayError, Result};
pub use format::{
    add_days, add_days_zoned, date_label, format_count, format_date, format_delta,
    format_integer, format_percent, month_abbreviation,
};
pub use math::{render_display_math, render_inline_math, KatexRenderer, LayoutMode, MathRenderer};
pub use states::{category_metadata, CATEGORY_METADATA};
pub use types::{Category, CategoryMeta, ModelKind, PopulationSnapshot, CHART_PADDING};
