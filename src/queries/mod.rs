pub mod circle_queries;
pub mod stats_queries;
