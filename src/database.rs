pub mod connection;
pub mod db;
pub mod dto;
pub mod repository;

pub use connection::*;
pub use repository::{
    games_repository::GamesRepository, listings_repository::ListingsRepository,
    stores_repository::StoresRepository,
};
