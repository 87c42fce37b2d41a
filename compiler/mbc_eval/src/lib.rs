//! Evaluation stages of the mbc engine: variable substitution, function
//! expansion over the call tree, and the postfix evaluator with its native
//! math primitives.

pub mod error;
pub mod evaluator;
pub mod expand;
pub mod natives;
pub mod substitute;

pub use error::{EvalError, EvalWarning};
pub use evaluator::{evaluate_infix, evaluate_postfix, Evaluation};
pub use expand::{ExpandConfig, Expander, Expansion};
pub use natives::{call_native, is_native, NATIVES};
pub use substitute::substitute_variables;

#[cfg(test)]
mod tests {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize the logger for tests
    pub fn init_test_logger() {
        INIT.call_once(|| {
            let _ = env_logger::builder().is_test(true).try_init();
            log::info!("Test logger initialized");
        });
    }
}
