//! Upstream data models and DTOs.

pub mod collection;
pub mod order;
pub mod pagination;
pub mod product;
pub mod record;
pub mod warehouse;
