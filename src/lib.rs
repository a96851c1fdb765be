pub mod api;
pub mod config;
pub mod content_api;
pub mod db;
pub mod error;
pub mod extract;
pub mod poll;
pub mod search;
