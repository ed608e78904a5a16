//! Business logic services.

pub mod cache;
pub mod catalog;
pub mod mock_data;
pub mod reports;
pub mod summary;
pub mod upstream;
