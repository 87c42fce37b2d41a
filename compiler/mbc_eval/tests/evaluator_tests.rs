use mbc_env::{FunctionTable, VariableTable};
use mbc_eval::{evaluate_infix, substitute_variables, EvalError, ExpandConfig, Expander};
use mbc_lexer::tokenize;
use mbc_parser::{parse_definition, ConverterConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Substitutes, expands and evaluates one expression.
fn run(source: &str, functions: &FunctionTable, variables: &VariableTable) -> Result<f64, EvalError> {
    let tokens = substitute_variables(&tokenize(source)?, variables);
    let expanded = Expander::new(functions, ExpandConfig::default()).expand(&tokens)?;
    Ok(evaluate_infix(&expanded.tokens, ConverterConfig::default())?.value)
}

fn value(source: &str) -> f64 {
    run(source, &FunctionTable::with_builtins(), &VariableTable::new()).unwrap()
}

#[test]
fn builtins_evaluate() {
    init();
    assert_eq!(value("sqrt(9)+pow(2,3)"), 11.0);
    assert_eq!(value("pow(5)"), 25.0);
    assert_eq!(value("ceil(1.2)*floor(-1.2)"), -4.0);
    assert_eq!(value("log(exp(0))"), 0.0);
    assert_eq!(value("hypot(5k,12k)"), 13000.0);
}

#[test]
fn variables_feed_function_arguments() {
    init();
    let mut functions = FunctionTable::with_builtins();
    let spec = parse_definition("area(w,h=w):w*h\"rectangle area\"", '"')
        .unwrap()
        .unwrap();
    functions.define(spec);

    let mut variables = VariableTable::new();
    variables.set("w", 3.0);
    variables.set("h", 100.0);

    assert_eq!(run("area(w,2)", &functions, &variables), Ok(6.0));
    assert_eq!(run("area(4)", &functions, &variables), Err(EvalError::UnresolvedIdentifier("w".into())));
    assert_eq!(run("w*h", &functions, &variables), Ok(300.0));
}

#[test]
fn nested_user_functions() {
    init();
    let mut functions = FunctionTable::with_builtins();
    for definition in ["double(x):x*2", "quad(x):double(double(x))", "norm(a,b):sqrt(pow(a)+pow(b))"] {
        functions.define(parse_definition(definition, '"').unwrap().unwrap());
    }
    let variables = VariableTable::new();
    assert_eq!(run("quad(3)", &functions, &variables), Ok(12.0));
    assert_eq!(run("norm(6,8)", &functions, &variables), Ok(10.0));
    assert_eq!(run("quad(norm(3,4))-1", &functions, &variables), Ok(19.0));
}

proptest! {
    #[test]
    fn subtraction_chains_fold_left(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
        let source = format!("({a})-({b})-({c})");
        prop_assert_eq!(value(&source), f64::from(a - b - c));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition(a in 0u16..1000, b in 0u16..1000, c in 0u16..1000) {
        let source = format!("{a}+{b}*{c}");
        prop_assert_eq!(value(&source), f64::from(a) + f64::from(b) * f64::from(c));
    }

    #[test]
    fn comparisons_yield_flags(a in -50i32..50, b in -50i32..50) {
        prop_assert_eq!(value(&format!("({a})<({b})")), if a < b { 1.0 } else { 0.0 });
        prop_assert_eq!(value(&format!("({a})==({b})")), if a == b { 1.0 } else { 0.0 });
    }
}
