//! Value objects - immutable types that represent domain concepts

mod month_day;
mod snowflake;

pub use month_day::{MonthDay, REFERENCE_YEAR};
pub use snowflake::{Snowflake, SnowflakeParseError};
