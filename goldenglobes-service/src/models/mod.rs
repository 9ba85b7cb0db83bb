pub mod award;
pub mod filter;

pub use award::AwardRecord;
pub use filter::{cast_boolean, cast_number, AwardFilter, CastError};
