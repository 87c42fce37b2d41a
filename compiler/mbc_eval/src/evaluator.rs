//! Stack evaluation of postfix token sequences.
//!
//! Binary operators pop the right operand first: `a b -` is `a - b`.
//! Bitwise and shift operators work on the operands truncated to `i64`;
//! comparison and logical operators yield `1` or `0`.

use log::{trace, warn};
use mbc_lexer::{Arity, Operator, Token, TokenType};
use mbc_parser::{to_postfix, ConverterConfig};

use crate::error::{EvalError, EvalWarning};

/// The value of an expression and any warnings raised computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub warnings: Vec<EvalWarning>,
}

impl Evaluation {
    fn clean(value: f64) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }
}

fn truth(value: f64) -> bool {
    value != 0.0
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn apply_unary(operator: Operator, value: f64) -> f64 {
    match operator {
        Operator::Increment => value + 1.0,
        Operator::Decrement => value - 1.0,
        Operator::Not => flag(!truth(value)),
        _ => value,
    }
}

/// `lhs` is the second value popped, `rhs` the first.
fn apply_binary(operator: Operator, lhs: f64, rhs: f64) -> f64 {
    let (a, b) = (lhs as i64, rhs as i64);
    match operator {
        Operator::Power => lhs.powf(rhs),
        Operator::Multiply => lhs * rhs,
        Operator::Divide => lhs / rhs,
        Operator::Modulo => lhs % rhs,
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::ShiftLeft => u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shl(shift))
            .unwrap_or(0) as f64,
        Operator::ShiftRight => u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shr(shift))
            .unwrap_or(if a < 0 { -1 } else { 0 }) as f64,
        Operator::Less => flag(lhs < rhs),
        Operator::Greater => flag(lhs > rhs),
        Operator::LessEqual => flag(lhs <= rhs),
        Operator::GreaterEqual => flag(lhs >= rhs),
        Operator::Equal => flag(lhs == rhs),
        Operator::NotEqual => flag(lhs != rhs),
        Operator::BitAnd => (a & b) as f64,
        Operator::BitXor => (a ^ b) as f64,
        Operator::BitOr => (a | b) as f64,
        Operator::And => flag(truth(lhs) && truth(rhs)),
        Operator::Xor => flag(truth(lhs) != truth(rhs)),
        Operator::Or => flag(truth(lhs) || truth(rhs)),
        Operator::Increment | Operator::Decrement | Operator::Not => rhs,
    }
}

/// Evaluates a postfix sequence. An empty sequence is `0`; more than one
/// value left on the stack is a warning and the top value wins.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<Evaluation, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match &token.token_type {
            TokenType::Number(value) => stack.push(*value),
            TokenType::Identifier(name) => {
                return Err(EvalError::UnresolvedIdentifier(name.clone()))
            }
            TokenType::Operator(operator) => {
                let missing = || EvalError::MissingOperand(*operator);
                let value = match operator.arity() {
                    Arity::Unary => apply_unary(*operator, stack.pop().ok_or_else(missing)?),
                    Arity::Binary => {
                        let rhs = stack.pop().ok_or_else(missing)?;
                        let lhs = stack.pop().ok_or_else(missing)?;
                        apply_binary(*operator, lhs, rhs)
                    }
                };
                trace!("{} -> {}", operator, value);
                stack.push(value);
            }
            TokenType::Comma | TokenType::Assign | TokenType::Open(_) | TokenType::Close(_) => {
                return Err(EvalError::UnexpectedToken(token.lexeme.clone()))
            }
        }
    }

    let mut evaluation = Evaluation::clean(stack.last().copied().unwrap_or(0.0));
    if stack.len() > 1 {
        warn!("{} values left on the evaluation stack", stack.len());
        evaluation
            .warnings
            .push(EvalWarning::MultipleResults(stack.len()));
    }
    Ok(evaluation)
}

/// Converts an infix sequence to postfix and evaluates it.
pub fn evaluate_infix(tokens: &[Token], config: ConverterConfig) -> Result<Evaluation, EvalError> {
    let postfix = to_postfix(tokens, config)?;
    evaluate_postfix(&postfix)
}
