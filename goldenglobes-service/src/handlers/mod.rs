pub mod awards;
pub mod catalog;
pub mod health;

pub use awards::{
    awards_by_film, awards_by_nominee, awards_by_win, awards_by_year, list_awards,
    release_by_year,
};
pub use catalog::endpoint_catalog;
pub use health::{health_check, metrics_endpoint};
