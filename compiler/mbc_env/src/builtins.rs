use lazy_static::lazy_static;
use mbc_ast::{ArgumentSpec, FunctionSpec};

/// Single-argument wrappers around a reserved native: `name(x):__name__(x)`.
const UNARY_NATIVES: [(&str, &str); 11] = [
    ("log", "natural logarithm"),
    ("log10", "base 10 logarithm"),
    ("ceil", "smallest integer not less than x"),
    ("floor", "largest integer not greater than x"),
    ("abs", "absolute value"),
    ("cos", "cosine, x in radians"),
    ("sin", "sine, x in radians"),
    ("tan", "tangent, x in radians"),
    ("cosh", "hyperbolic cosine"),
    ("sinh", "hyperbolic sine"),
    ("tanh", "hyperbolic tangent"),
];

lazy_static! {
    /// Reference definitions of the built-in functions. Sessions copy these
    /// into their own [`crate::FunctionTable`]; the statics never change.
    pub static ref REFERENCE_FUNCTIONS: Vec<FunctionSpec> = {
        let mut functions: Vec<FunctionSpec> = UNARY_NATIVES
            .iter()
            .map(|(name, description)| {
                FunctionSpec::new(
                    *name,
                    vec![ArgumentSpec::required("x")],
                    format!("__{name}__(x)"),
                    *description,
                )
            })
            .collect();

        functions.push(FunctionSpec::new(
            "pow",
            vec![ArgumentSpec::required("x"), ArgumentSpec::optional("y", "2")],
            "__pow__(x,y)",
            "x raised to the power y, squares by default",
        ));
        functions.push(FunctionSpec::new(
            "sqrt",
            vec![ArgumentSpec::required("x")],
            "pow(x,0.5)",
            "square root",
        ));
        functions.push(FunctionSpec::new(
            "exp",
            vec![ArgumentSpec::required("x")],
            "__pow__(2.718281828459045,x)",
            "e raised to the power x",
        ));
        functions.push(FunctionSpec::new(
            "hypot",
            vec![ArgumentSpec::required("a"), ArgumentSpec::required("b")],
            "sqrt(a*a+b*b)",
            "length of the hypotenuse of a right triangle with legs a and b",
        ));
        functions
    };
}

/// The reference definition named `name`, if it is a built-in.
pub fn reference_function(name: &str) -> Option<&'static FunctionSpec> {
    REFERENCE_FUNCTIONS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_are_seeded() {
        assert_eq!(REFERENCE_FUNCTIONS.len(), 15);
        let log = reference_function("log").unwrap();
        assert_eq!(log.body, "__log__(x)");
        let pow = reference_function("pow").unwrap();
        assert_eq!(pow.signature(), "pow(x,y=2)");
        assert!(reference_function("__pow__").is_none());
    }

    #[test]
    fn names_are_unique() {
        for spec in REFERENCE_FUNCTIONS.iter() {
            let count = REFERENCE_FUNCTIONS
                .iter()
                .filter(|other| other.name == spec.name)
                .count();
            assert_eq!(count, 1, "{} is declared twice", spec.name);
        }
    }
}
