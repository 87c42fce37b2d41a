//! Reserved native math primitives, called as `__name__(args)`.

use log::trace;

use crate::error::EvalError;

/// Reserved names and their argument counts.
pub const NATIVES: [(&str, usize); 12] = [
    ("__log__", 1),
    ("__log10__", 1),
    ("__ceil__", 1),
    ("__floor__", 1),
    ("__abs__", 1),
    ("__cos__", 1),
    ("__sin__", 1),
    ("__tan__", 1),
    ("__cosh__", 1),
    ("__sinh__", 1),
    ("__tanh__", 1),
    ("__pow__", 2),
];

pub fn is_native(name: &str) -> bool {
    NATIVES.iter().any(|(native, _)| *native == name)
}

/// Applies the native `name` to already evaluated arguments.
pub fn call_native(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    let expected = NATIVES
        .iter()
        .find(|(native, _)| *native == name)
        .map(|(_, arity)| *arity)
        .ok_or_else(|| EvalError::UnknownReservedName(name.to_string()))?;
    if args.len() != expected {
        return Err(EvalError::NativeArity {
            name: name.to_string(),
            expected,
            supplied: args.len(),
        });
    }

    let value = match (name, args) {
        ("__pow__", [base, exponent]) => base.powf(*exponent),
        (_, [x]) => match name {
            "__log__" => x.ln(),
            "__log10__" => x.log10(),
            "__ceil__" => x.ceil(),
            "__floor__" => x.floor(),
            "__abs__" => x.abs(),
            "__cos__" => x.cos(),
            "__sin__" => x.sin(),
            "__tan__" => x.tan(),
            "__cosh__" => x.cosh(),
            "__sinh__" => x.sinh(),
            "__tanh__" => x.tanh(),
            _ => return Err(EvalError::UnknownReservedName(name.to_string())),
        },
        _ => return Err(EvalError::UnknownReservedName(name.to_string())),
    };
    trace!("{}({:?}) = {}", name, args, value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unary_natives() {
        assert_eq!(call_native("__abs__", &[-2.5]), Ok(2.5));
        assert_eq!(call_native("__floor__", &[2.7]), Ok(2.0));
        assert_eq!(call_native("__ceil__", &[2.1]), Ok(3.0));
        let log10 = call_native("__log10__", &[1000.0]).unwrap();
        assert!((log10 - 3.0).abs() < 1e-12);
        assert_eq!(call_native("__log__", &[1.0]), Ok(0.0));
        assert_eq!(call_native("__sin__", &[0.0]), Ok(0.0));
        assert_eq!(call_native("__cosh__", &[0.0]), Ok(1.0));
    }

    #[test]
    fn pow_takes_two_arguments() {
        assert_eq!(call_native("__pow__", &[2.0, 10.0]), Ok(1024.0));
        assert_eq!(
            call_native("__pow__", &[2.0]),
            Err(EvalError::NativeArity {
                name: "__pow__".into(),
                expected: 2,
                supplied: 1
            })
        );
    }

    #[test]
    fn unknown_reserved_name() {
        assert!(is_native("__tanh__"));
        assert!(!is_native("__sqrt__"));
        assert_eq!(
            call_native("__sqrt__", &[4.0]),
            Err(EvalError::UnknownReservedName("__sqrt__".into()))
        );
    }
}
