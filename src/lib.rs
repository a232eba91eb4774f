pub mod config;
pub mod data;
pub mod error;
pub mod field;
pub mod interactive;
pub mod layout;
pub mod model;
