pub mod agent;
pub mod backend;
pub mod cli;
pub mod client;
pub mod config;
pub mod files;
pub mod glob;
pub mod protocol;
pub mod registry;
pub mod render;
pub mod search;
pub mod shell;

pub use agent::Agent;
pub use config::Config;
