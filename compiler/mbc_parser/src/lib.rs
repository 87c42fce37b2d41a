pub mod parser;

pub use parser::call_tree::build_call_tree;
pub use parser::definition::{is_definition, parse_definition, validate_definition};
pub use parser::error::{DefinitionError, ParseError, StructureError};
pub use parser::postfix::{to_postfix, ConverterConfig};
pub use parser::statement::{check_structure, clean_statement, split_statements};


// Integration tests are in the tests/ directory
