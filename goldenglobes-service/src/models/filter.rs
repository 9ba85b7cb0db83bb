//! Exact-match filters over award records and the coercion of raw path
//! values into them.
//!
//! Coercion follows document-mapper casting rules: numbers are parsed from
//! decimal text, booleans accept `true/1/yes` and `false/0/no`, strings pass
//! through untouched.

use crate::models::AwardRecord;
use mongodb::bson::{doc, Document};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    #[error("{0:?} is not a number")]
    Number(String),

    #[error("{0:?} is not a boolean")]
    Boolean(String),
}

/// Parse a path value for a numeric field.
///
/// A fractional value is accepted; it simply matches no integer field.
pub fn cast_number(raw: &str) -> Result<f64, CastError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CastError::Number(raw.to_string()))
}

pub fn cast_boolean(raw: &str) -> Result<bool, CastError> {
    match raw {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CastError::Boolean(raw.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AwardFilter {
    YearFilm(f64),
    YearAward(f64),
    Film(String),
    Nominee(String),
    Win(bool),
}

impl AwardFilter {
    pub fn field(&self) -> &'static str {
        match self {
            AwardFilter::YearFilm(_) => "year_film",
            AwardFilter::YearAward(_) => "year_award",
            AwardFilter::Film(_) => "film",
            AwardFilter::Nominee(_) => "nominee",
            AwardFilter::Win(_) => "win",
        }
    }

    /// Query document for the store. Numbers are sent as doubles; MongoDB
    /// compares them numerically against the stored int32 values.
    pub fn to_document(&self) -> Document {
        let field = self.field();
        match self {
            AwardFilter::YearFilm(n) | AwardFilter::YearAward(n) => doc! { field: *n },
            AwardFilter::Film(s) | AwardFilter::Nominee(s) => doc! { field: s.as_str() },
            AwardFilter::Win(b) => doc! { field: *b },
        }
    }

    pub fn matches(&self, record: &AwardRecord) -> bool {
        match self {
            AwardFilter::YearFilm(n) => f64::from(record.year_film) == *n,
            AwardFilter::YearAward(n) => f64::from(record.year_award) == *n,
            AwardFilter::Film(s) => record.film == *s,
            AwardFilter::Nominee(s) => record.nominee == *s,
            AwardFilter::Win(b) => record.win == *b,
        }
    }
}
