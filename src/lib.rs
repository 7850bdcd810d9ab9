pub mod analyzer;
pub mod config;
pub mod error;
pub mod handler;
pub mod index;
pub mod model;
pub mod server;
pub mod util;
