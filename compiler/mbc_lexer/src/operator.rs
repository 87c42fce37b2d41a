//! Static operator table.
//!
//! Every operator the language knows is declared once in [`OPERATORS`]. The
//! declared `rank` is a lookup order (lower rank binds tighter); the
//! comparison precedence used by the converter is derived from it with
//! [`OperatorSpec::precedence`].

use std::fmt;

/// Operators recognised by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Increment,
    Decrement,
    Power,
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    ShiftLeft,
    ShiftRight,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    BitAnd,
    BitXor,
    BitOr,
    Not,
    And,
    Xor,
    Or,
}

/// Number of operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    /// Operand count as a number.
    pub fn count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// Coarse grouping used when rendering the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Arithmetic,
    Shift,
    Comparison,
    Bitwise,
    Logical,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Arithmetic => "arithmetic",
            Category::Shift => "shift",
            Category::Comparison => "comparison",
            Category::Bitwise => "bitwise",
            Category::Logical => "logical",
        };
        f.pad(name)
    }
}

/// One row of the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub operator: Operator,
    pub symbol: &'static str,
    /// Declaration rank, 1 is the tightest binding.
    pub rank: u8,
    pub arity: Arity,
    pub category: Category,
    pub description: &'static str,
}

impl OperatorSpec {
    /// Comparison precedence: `max_rank + 1 - rank`, so a lower declared
    /// rank compares as a higher precedence.
    pub fn precedence(&self) -> u8 {
        MAX_RANK + 1 - self.rank
    }
}

/// Highest rank declared in [`OPERATORS`].
pub const MAX_RANK: u8 = 13;

/// The operator table, in declaration order.
pub static OPERATORS: [OperatorSpec; 23] = [
    OperatorSpec {
        operator: Operator::Increment,
        symbol: "++",
        rank: 1,
        arity: Arity::Unary,
        category: Category::Arithmetic,
        description: "increment operand by one",
    },
    OperatorSpec {
        operator: Operator::Decrement,
        symbol: "--",
        rank: 1,
        arity: Arity::Unary,
        category: Category::Arithmetic,
        description: "decrement operand by one",
    },
    OperatorSpec {
        operator: Operator::Power,
        symbol: "**",
        rank: 2,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "exponentiation",
    },
    OperatorSpec {
        operator: Operator::Multiply,
        symbol: "*",
        rank: 3,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "multiplication",
    },
    OperatorSpec {
        operator: Operator::Divide,
        symbol: "/",
        rank: 3,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "division",
    },
    OperatorSpec {
        operator: Operator::Modulo,
        symbol: "%",
        rank: 3,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "floating point remainder",
    },
    OperatorSpec {
        operator: Operator::Add,
        symbol: "+",
        rank: 4,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "addition",
    },
    OperatorSpec {
        operator: Operator::Subtract,
        symbol: "-",
        rank: 4,
        arity: Arity::Binary,
        category: Category::Arithmetic,
        description: "subtraction",
    },
    OperatorSpec {
        operator: Operator::ShiftLeft,
        symbol: "<<",
        rank: 5,
        arity: Arity::Binary,
        category: Category::Shift,
        description: "bitwise shift left",
    },
    OperatorSpec {
        operator: Operator::ShiftRight,
        symbol: ">>",
        rank: 5,
        arity: Arity::Binary,
        category: Category::Shift,
        description: "arithmetic shift right",
    },
    OperatorSpec {
        operator: Operator::Less,
        symbol: "<",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "less than",
    },
    OperatorSpec {
        operator: Operator::Greater,
        symbol: ">",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "greater than",
    },
    OperatorSpec {
        operator: Operator::LessEqual,
        symbol: "<=",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "less than or equal",
    },
    OperatorSpec {
        operator: Operator::GreaterEqual,
        symbol: ">=",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "greater than or equal",
    },
    OperatorSpec {
        operator: Operator::Equal,
        symbol: "==",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "equal",
    },
    OperatorSpec {
        operator: Operator::NotEqual,
        symbol: "!=",
        rank: 6,
        arity: Arity::Binary,
        category: Category::Comparison,
        description: "not equal",
    },
    OperatorSpec {
        operator: Operator::BitAnd,
        symbol: "&",
        rank: 7,
        arity: Arity::Binary,
        category: Category::Bitwise,
        description: "bitwise and on 64-bit integers",
    },
    OperatorSpec {
        operator: Operator::BitXor,
        symbol: "^",
        rank: 8,
        arity: Arity::Binary,
        category: Category::Bitwise,
        description: "bitwise exclusive or on 64-bit integers",
    },
    OperatorSpec {
        operator: Operator::BitOr,
        symbol: "|",
        rank: 9,
        arity: Arity::Binary,
        category: Category::Bitwise,
        description: "bitwise or on 64-bit integers",
    },
    OperatorSpec {
        operator: Operator::Not,
        symbol: "!",
        rank: 10,
        arity: Arity::Unary,
        category: Category::Logical,
        description: "logical not",
    },
    OperatorSpec {
        operator: Operator::And,
        symbol: "&&",
        rank: 11,
        arity: Arity::Binary,
        category: Category::Logical,
        description: "logical and",
    },
    OperatorSpec {
        operator: Operator::Xor,
        symbol: "^^",
        rank: 12,
        arity: Arity::Binary,
        category: Category::Logical,
        description: "logical exclusive or",
    },
    OperatorSpec {
        operator: Operator::Or,
        symbol: "||",
        rank: 13,
        arity: Arity::Binary,
        category: Category::Logical,
        description: "logical or",
    },
];

impl Operator {
    /// The table row for this operator.
    pub fn spec(self) -> &'static OperatorSpec {
        // Rows are declared in variant order.
        &OPERATORS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.spec().symbol
    }

    pub fn arity(self) -> Arity {
        self.spec().arity
    }

    pub fn precedence(self) -> u8 {
        self.spec().precedence()
    }

    /// Looks up an operator by its exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        OPERATORS
            .iter()
            .find(|spec| spec.symbol == symbol)
            .map(|spec| spec.operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_operator_has_one_row() {
        for spec in OPERATORS.iter() {
            let rows = OPERATORS
                .iter()
                .filter(|other| other.operator == spec.operator)
                .count();
            assert_eq!(rows, 1, "duplicate row for {}", spec.symbol);
            assert_eq!(spec.operator.spec(), spec);
        }
    }

    #[test]
    fn max_rank_matches_table() {
        let max = OPERATORS.iter().map(|spec| spec.rank).max();
        assert_eq!(max, Some(MAX_RANK));
    }

    #[test]
    fn precedence_order() {
        use Operator::*;
        let chain = [Increment, Power, Multiply, Add, ShiftLeft, Less, BitAnd, BitXor, BitOr, Not, And, Xor, Or];
        for pair in chain.windows(2) {
            assert!(
                pair[0].precedence() > pair[1].precedence(),
                "{} should bind tighter than {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(Multiply.precedence(), Divide.precedence());
        assert_eq!(Add.precedence(), Subtract.precedence());
    }

    #[test]
    fn lookup_by_symbol() {
        assert_eq!(Operator::from_symbol("**"), Some(Operator::Power));
        assert_eq!(Operator::from_symbol("^^"), Some(Operator::Xor));
        assert_eq!(Operator::from_symbol("="), None);
    }
}
