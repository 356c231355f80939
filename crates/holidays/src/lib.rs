//! apipoll-holidays: public holidays per country from date.nager.at
//!
//! Fetches `GET /api/v3/PublicHolidays/{year}/{country}` for each country,
//! prints the holiday list, and writes a per-country count summary with the
//! countries having the most and fewest holidays.

pub mod client;
pub mod summary;

pub use client::{collect_counts, Holiday, HolidaysClient, HOLIDAYS_URL};
pub use summary::{save_summary, CountryCounts, HolidaySummary};

pub const DEFAULT_YEAR: i32 = 2024;
pub const DEFAULT_OUTPUT: &str = "holidays_summary.json";
