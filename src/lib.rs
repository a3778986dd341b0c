pub mod cli;
pub mod config;
pub mod constants;
pub mod container;
pub mod context;
pub mod dockerfile;
pub mod helpers;
pub mod index;
pub mod os_version;
pub mod package;
pub mod service;
pub mod versions;

pub use anyhow::Result;
