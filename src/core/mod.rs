pub mod config;
pub mod export;
pub mod goal;
pub mod import;
pub mod log;
pub mod presence;
pub mod report;
