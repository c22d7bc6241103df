pub mod cli;
pub mod conf;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod render;
