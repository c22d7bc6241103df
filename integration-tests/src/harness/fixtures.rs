use forester_perf_core::pipeline::{EventStore, load_log};
use std::fs;
use std::path::PathBuf;

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

pub fn read_fixture(file: &str) -> String {
    fs::read_to_string(fixture_path(file)).expect("failed to read fixture")
}

pub fn load_fixture(file: &str) -> EventStore {
    load_log(&fixture_path(file)).expect("failed to load fixture log")
}
