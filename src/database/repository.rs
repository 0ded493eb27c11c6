pub mod games_repository;
pub mod listings_repository;
pub mod stores_repository;
