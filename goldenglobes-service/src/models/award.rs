use serde::{Deserialize, Serialize};

/// One nomination entry for a Golden Globes ceremony.
///
/// The MongoDB `_id` is deliberately absent: it is ignored on reads and
/// never appears in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwardRecord {
    pub year_film: i32,
    pub year_award: i32,
    pub ceremony: i32,
    pub category: String,
    pub nominee: String,
    pub film: String,
    pub win: bool,
}
