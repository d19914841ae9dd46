pub mod bootstrap;
pub mod config;
pub mod google;
pub mod http;
pub mod repositories;
