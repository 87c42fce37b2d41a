use log::debug;
use mbc_ast::FunctionSpec;
use thiserror::Error;

use crate::builtins::{reference_function, REFERENCE_FUNCTIONS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("'{0}' is not a built-in function and cannot be reset")]
    UnknownReference(String),
}

/// Outcome of [`FunctionTable::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    Added,
    Replaced,
}

/// The functions visible to one session, in registration order.
///
/// Starts as a copy of the reference definitions. A redefinition overwrites
/// the entry in place; there is no overloading by argument count.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: Vec<FunctionSpec>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FunctionTable {
    /// A table with no functions at all.
    pub fn empty() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// A table seeded with every reference definition.
    pub fn with_builtins() -> Self {
        Self {
            functions: REFERENCE_FUNCTIONS.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registers `spec`, replacing any function of the same name.
    pub fn define(&mut self, spec: FunctionSpec) -> Definition {
        match self.functions.iter_mut().find(|existing| existing.name == spec.name) {
            Some(existing) => {
                debug!("redefining function '{}'", spec.name);
                *existing = spec;
                Definition::Replaced
            }
            None => {
                debug!("defining function '{}'", spec.name);
                self.functions.push(spec);
                Definition::Added
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FunctionSpec> {
        let index = self.functions.iter().position(|spec| spec.name == name)?;
        Some(self.functions.remove(index))
    }

    /// Restores the built-in `name` to its reference definition, adding it
    /// back if it is missing. Nothing changes when `name` is not a built-in.
    pub fn reset_one(&mut self, name: &str) -> Result<&FunctionSpec, EnvError> {
        let reference =
            reference_function(name).ok_or_else(|| EnvError::UnknownReference(name.to_string()))?;
        self.define(reference.clone());
        self.get(name)
            .ok_or_else(|| EnvError::UnknownReference(name.to_string()))
    }

    /// Drops user functions and restores every built-in.
    pub fn reset_all(&mut self) {
        debug!("restoring {} reference functions", REFERENCE_FUNCTIONS.len());
        self.functions = REFERENCE_FUNCTIONS.clone();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbc_ast::ArgumentSpec;
    use pretty_assertions::assert_eq;

    fn square() -> FunctionSpec {
        FunctionSpec::new("sqrt", vec![ArgumentSpec::required("v")], "v*v", "not a root")
    }

    #[test]
    fn define_adds_then_replaces() {
        let mut table = FunctionTable::with_builtins();
        let before = table.len();

        let f = FunctionSpec::new("f", vec![ArgumentSpec::required("x")], "x*2", "");
        assert_eq!(table.define(f), Definition::Added);
        assert_eq!(table.len(), before + 1);

        assert_eq!(table.define(square()), Definition::Replaced);
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.get("sqrt").map(|s| s.body.as_str()), Some("v*v"));
    }

    #[test]
    fn reset_one_restores_reference() {
        let mut table = FunctionTable::with_builtins();
        table.define(square());
        let restored = table.reset_one("sqrt").unwrap();
        assert_eq!(restored.body, "pow(x,0.5)");
        assert_eq!(restored.signature(), "sqrt(x)");
    }

    #[test]
    fn reset_one_appends_missing_builtin() {
        let mut table = FunctionTable::with_builtins();
        table.remove("hypot");
        assert!(!table.contains("hypot"));
        table.reset_one("hypot").unwrap();
        assert!(table.contains("hypot"));
    }

    #[test]
    fn reset_one_rejects_unknown_names() {
        let mut table = FunctionTable::with_builtins();
        let before = table.iter().cloned().collect::<Vec<_>>();
        assert_eq!(
            table.reset_one("doesNotExist"),
            Err(EnvError::UnknownReference("doesNotExist".to_string()))
        );
        assert_eq!(table.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn reset_all_drops_user_functions() {
        let mut table = FunctionTable::with_builtins();
        table.define(FunctionSpec::new("g", vec![], "1", ""));
        table.define(square());
        table.reset_all();
        assert!(!table.contains("g"));
        assert_eq!(table.len(), REFERENCE_FUNCTIONS.len());
        assert_eq!(table.get("sqrt").map(|s| s.body.as_str()), Some("pow(x,0.5)"));
    }
}
