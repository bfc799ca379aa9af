pub mod schema;
pub mod circle_repo;
pub mod member_repo;
pub mod tx_repo;
