mod fixtures;
mod tracing;

pub use self::fixtures::{fixture_path, load_fixture, read_fixture};
pub use self::tracing::{CapturedEvent, capture_events};
