pub mod bootstrap;
pub mod catalog_clients;
#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
pub mod csv;
