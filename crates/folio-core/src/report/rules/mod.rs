//! Rule-based field extraction for fund reports.

pub mod amounts;
pub mod dates;
pub mod metadata;
pub mod patterns;

pub use amounts::parse_amount;
pub use dates::{parse_flexible_date, quarter_end_date};
pub use metadata::{detect_metadata, extract_fund_name, extract_period};
