pub mod data;
pub mod endpoints;
pub mod error;
pub mod store;
