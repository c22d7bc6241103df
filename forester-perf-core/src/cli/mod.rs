pub mod compare;
pub mod config;
pub mod report;
