use mbc_lexer::token::{render_tokens, TokenType};
use mbc_lexer::{tokenize, SI_PREFIXES};
use proptest::prelude::*;

fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_numeric_literals() {
    init_test_logger();
    let valid_cases = [
        ("42", 42.0),
        ("-123", -123.0),
        ("3.14159", 3.14159),
        ("1.0E+10", 1.0e10),
        ("1.0E-10", 1.0e-10),
        ("7e2", 700.0),
    ];

    for (input, expected) in valid_cases.iter() {
        let tokens = tokenize(input).unwrap();
        assert_eq!(
            tokens.len(),
            1,
            "Expected exactly one token for input: {}",
            input
        );
        assert_eq!(
            tokens[0].token_type,
            TokenType::Number(*expected),
            "Mismatch for input: {}",
            input
        );
    }
}

#[test]
fn test_statement_with_everything() {
    init_test_logger();
    let tokens = tokenize("r=f(2k,[x-1])**-2").unwrap();
    assert_eq!(
        render_tokens(&tokens),
        "r = f ( ( 2 * 1E3 ) , [ x - 1 ] ) ** -2"
    );
}

#[test]
fn test_invalid_characters() {
    for input in ["1#2", "a.b.c", "@", "3;4"] {
        assert!(tokenize(input).is_err(), "expected error for {input}");
    }
}

proptest! {
    #[test]
    fn si_suffix_scales_the_literal(mantissa in 0u32..100_000, index in 0usize..SI_PREFIXES.len()) {
        let prefix = &SI_PREFIXES[index];
        let input = format!("{mantissa}{}", prefix.symbol);
        let tokens = tokenize(&input).unwrap();

        prop_assert_eq!(tokens.len(), 5);
        prop_assert_eq!(&tokens[1].token_type, &TokenType::Number(f64::from(mantissa)));
        prop_assert_eq!(&tokens[3].token_type, &TokenType::Number(prefix.multiplier()));
    }

    #[test]
    fn identifiers_round_trip(name in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
        let tokens = tokenize(&name).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(&tokens[0].token_type, &TokenType::Identifier(name.clone()));
    }
}
