pub mod cli;
pub mod config;
pub mod emails;
pub mod export;
pub mod fetcher;
pub mod marketing;
pub mod orders;
pub mod products;
pub mod simulate;
pub mod store;
