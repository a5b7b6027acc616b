//! Common types and utilities shared across the verification input crates.

pub mod error;
pub mod location;
pub mod time;
pub mod util;
pub mod variable;

pub use error::{CommonError, CommonResult};
pub use location::Location;
pub use time::date_to_naive;
pub use util::{as_integer, clean, clean_slice, is_number, parse_clean, MISSING_VALUE};
pub use variable::Variable;
