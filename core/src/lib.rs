pub mod api;
pub mod composer;
pub mod config;
pub mod error;
pub mod lab;
