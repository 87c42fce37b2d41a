use std::fmt;

/// One declared argument of a function, with its optional default expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub default: Option<String>,
}

impl ArgumentSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Display for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, default),
            None => f.write_str(&self.name),
        }
    }
}

/// A user-defined or built-in function: a body template over its arguments.
///
/// Arguments after the first defaulted one are defaulted too; the definition
/// parser rejects anything else before a `FunctionSpec` is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgumentSpec>,
    pub body: String,
}

impl FunctionSpec {
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<ArgumentSpec>,
        body: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments,
            body: body.into(),
        }
    }

    /// Number of arguments without a default.
    pub fn required_count(&self) -> usize {
        self.arguments.iter().filter(|arg| !arg.is_optional()).count()
    }

    pub fn optional_count(&self) -> usize {
        self.arguments.len() - self.required_count()
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// `name(a,b=2)`
    pub fn signature(&self) -> String {
        let arguments: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, arguments.join(","))
    }
}

/// Renders the definition statement that produces this function.
impl fmt::Display for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.signature(), self.body)?;
        if !self.description.is_empty() {
            write!(f, " \"{}\"", self.description)?;
        }
        Ok(())
    }
}

/// Reserved internal names are wrapped in double underscores, e.g. `__sin__`.
pub fn is_reserved_name(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_and_signature() {
        let spec = FunctionSpec::new(
            "f",
            vec![ArgumentSpec::required("x"), ArgumentSpec::optional("y", "2")],
            "x*y",
            "scale x",
        );
        assert_eq!(spec.required_count(), 1);
        assert_eq!(spec.optional_count(), 1);
        assert_eq!(spec.signature(), "f(x,y=2)");
        assert_eq!(spec.to_string(), "f(x,y=2):x*y \"scale x\"");
        assert_eq!(spec.argument("y").and_then(|a| a.default.as_deref()), Some("2"));
    }

    #[test]
    fn reserved_names() {
        assert!(is_reserved_name("__sin__"));
        assert!(is_reserved_name("__log10__"));
        assert!(!is_reserved_name("____"));
        assert!(!is_reserved_name("_sin_"));
        assert!(!is_reserved_name("sin"));
    }
}
