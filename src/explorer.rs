//! Loading, statistics, and paged viewing of city trip tables.

pub mod loader;
pub mod report;
pub mod view;

pub use loader::{apply_filters, load_city_table, load_filtered, load_raw_table, months_present};
pub use report::{
    DurationStats, StationStats, TimeStats, UserStats, compute_duration_stats,
    compute_station_stats, compute_time_stats, compute_user_stats, report_duration_stats,
    report_station_stats, report_time_stats, report_user_stats,
};
pub use view::page_rows;
