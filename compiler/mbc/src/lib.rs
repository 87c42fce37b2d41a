//! The mbc engine: loads `;` separated statements, evaluates them in
//! batches and hands back results, errors and warnings as text.
//!
//! ```text
//! let mut engine = Engine::new();
//! engine.load("f(x,y=2):x*y; f(3)");
//! engine.evaluate();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod help;

pub use config::EngineConfig;
pub use engine::{Engine, RESULT_END};
pub use error::{EngineError, EngineWarning};
