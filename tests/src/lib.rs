//! Helpers shared by the engine integration tests.

use mbc::{Engine, RESULT_END};

/// Reads every pending result of `engine`.
pub fn drain(engine: &mut Engine) -> Vec<String> {
    let mut results = Vec::new();
    loop {
        let result = engine.get_result();
        if result == RESULT_END {
            return results;
        }
        results.push(result);
    }
}

/// Loads `text`, evaluates it and returns the results.
pub fn run(engine: &mut Engine, text: &str) -> Vec<String> {
    engine.load(text);
    engine.evaluate();
    drain(engine)
}
