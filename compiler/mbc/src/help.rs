//! Text returned by the `help` and `report` commands.

use std::fmt;

use mbc_env::{FunctionTable, VariableTable};
use mbc_lexer::token::format_number;
use mbc_lexer::{OPERATORS, SI_PREFIXES};

const SYNTAX: &str = "\
Statements are separated by ';'.
  expression                 1+2*3
  assignment                 a=b=5k
  definition                 name(x,y=2):x*y\"description\"
  commands                   help, report, reset, reset#name
Text between a pair of '\"' outside a definition is a comment.
Brackets (), [] and {} group expressions.";

fn write_functions(f: &mut fmt::Formatter<'_>, functions: &FunctionTable) -> fmt::Result {
    for spec in functions.iter() {
        write!(f, "  {:<26} {}", spec.signature(), spec.body)?;
        if !spec.description.is_empty() {
            write!(f, "  \"{}\"", spec.description)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

struct Help<'a> {
    functions: &'a FunctionTable,
}

impl fmt::Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SYNTAX)?;
        f.write_str("\n\nOperators, tightest binding first:\n")?;
        for spec in OPERATORS.iter() {
            writeln!(
                f,
                "  {:<4} rank {:<3} {:<11} {}",
                spec.symbol, spec.rank, spec.category, spec.description
            )?;
        }

        f.write_str("\nSI suffixes:\n")?;
        for prefix in SI_PREFIXES.iter() {
            writeln!(f, "  {:<3} {:<6} 1E{}", prefix.symbol, prefix.name, prefix.exponent)?;
        }

        f.write_str("\nFunctions:\n")?;
        write_functions(f, self.functions)
    }
}

struct Report<'a> {
    variables: &'a VariableTable,
    functions: &'a FunctionTable,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variables ({}):", self.variables.len())?;
        for (name, value) in self.variables.iter() {
            writeln!(f, "  {name} = {}", format_number(value))?;
        }
        writeln!(f, "\nFunctions ({}):", self.functions.len())?;
        write_functions(f, self.functions)
    }
}

/// Syntax summary, the operator and SI prefix tables, and the functions
/// currently defined.
pub fn help_text(functions: &FunctionTable) -> String {
    Help { functions }.to_string().trim_end().to_string()
}

/// Variables and functions of the session.
pub fn report_text(variables: &VariableTable, functions: &FunctionTable) -> String {
    Report {
        variables,
        functions,
    }
    .to_string()
    .trim_end()
    .to_string()
}
