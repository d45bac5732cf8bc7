// Library surface for headless/integration tests and reuse.
// Terminal rendering lives in the binary.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod results;
pub mod runtime;
pub mod session;
pub mod text;

pub use evaluator::{Evaluator, Metrics};
pub use session::{Difficulty, SessionConfig, Status, TextCategory};
