//! Statement text handling done before tokenizing: splitting a loaded batch
//! on `;`, stripping whitespace and comments, and checking that brackets and
//! quotes can balance.

use log::trace;

use super::definition::is_definition;
use super::error::StructureError;

/// Splits `text` on `;` outside of quoted regions. Empty pieces are kept;
/// [`clean_statement`] decides what survives.
pub fn split_statements(text: &str, delimiter: char) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if c == delimiter {
            quoted = !quoted;
        } else if c == ';' && !quoted {
            statements.push(&text[start..index]);
            start = index + 1;
        }
    }
    statements.push(&text[start..]);
    statements
}

/// Removes whitespace outside quoted regions. Definitions keep their quoted
/// description; in any other statement quoted regions are comments and are
/// dropped. Returns `None` when nothing is left.
pub fn clean_statement(raw: &str, delimiter: char) -> Option<String> {
    let mut compact = String::with_capacity(raw.len());
    let mut quoted = false;
    for c in raw.chars() {
        if c == delimiter {
            quoted = !quoted;
            compact.push(c);
        } else if quoted || !c.is_whitespace() {
            compact.push(c);
        }
    }

    let statement = if is_definition(&compact) {
        compact
    } else {
        strip_comments(&compact, delimiter)
    };

    trace!("statement {:?} -> {:?}", raw, statement);
    (!statement.is_empty()).then_some(statement)
}

/// Drops every `"..."` pair, matched left to right. An unpaired delimiter
/// stays in place for [`check_structure`] to report.
fn strip_comments(statement: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(statement.len());
    let mut rest = statement;
    while let Some(open) = rest.find(delimiter) {
        let after = &rest[open + delimiter.len_utf8()..];
        match after.find(delimiter) {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after[close + delimiter.len_utf8()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Checks that each bracket kind has as many openers as closers outside of
/// quoted text, and that the quote delimiters pair up.
pub fn check_structure(statement: &str, delimiter: char) -> Result<(), StructureError> {
    let quotes = statement.chars().filter(|&c| c == delimiter).count();
    if quotes % 2 != 0 {
        return Err(StructureError::UnbalancedQuotes {
            delimiter,
            count: quotes,
        });
    }

    let mut counts = [(0usize, 0usize); 3];
    let mut quoted = false;
    for c in statement.chars() {
        if c == delimiter {
            quoted = !quoted;
            continue;
        }
        if quoted {
            continue;
        }
        match c {
            '(' => counts[0].0 += 1,
            ')' => counts[0].1 += 1,
            '[' => counts[1].0 += 1,
            ']' => counts[1].1 += 1,
            '{' => counts[2].0 += 1,
            '}' => counts[2].1 += 1,
            _ => {}
        }
    }

    for ((opens, closes), (open, close)) in counts.into_iter().zip([('(', ')'), ('[', ']'), ('{', '}')]) {
        if opens != closes {
            return Err(StructureError::UnbalancedBrackets {
                open,
                close,
                opens,
                closes,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_outside_quotes() {
        assert_eq!(split_statements("a=1;b=2;", '"'), vec!["a=1", "b=2", ""]);
        assert_eq!(
            split_statements("f(x):x\"a;b\";f(2)", '"'),
            vec!["f(x):x\"a;b\"", "f(2)"]
        );
    }

    #[test]
    fn cleans_whitespace_and_comments() {
        assert_eq!(clean_statement(" 1 + 2 ", '"'), Some("1+2".to_string()));
        assert_eq!(
            clean_statement("x = 3 \"three volts\" + 1", '"'),
            Some("x=3+1".to_string())
        );
        assert_eq!(clean_statement("  \"only a comment\" ", '"'), None);
        assert_eq!(clean_statement(" \t\n", '"'), None);
    }

    #[test]
    fn definitions_keep_their_description() {
        assert_eq!(
            clean_statement("f( x ) : x * 2 \"doubles x\"", '"'),
            Some("f(x):x*2\"doubles x\"".to_string())
        );
    }

    #[test]
    fn custom_comment_delimiter() {
        assert_eq!(clean_statement("1+`note`2", '`'), Some("1+2".to_string()));
    }

    #[test]
    fn structure_checks() {
        assert_eq!(check_structure("(1+2)*[3]", '"'), Ok(()));
        assert_eq!(
            check_structure("(1+2", '"'),
            Err(StructureError::UnbalancedBrackets {
                open: '(',
                close: ')',
                opens: 1,
                closes: 0
            })
        );
        assert!(matches!(
            check_structure("1+\"x", '"'),
            Err(StructureError::UnbalancedQuotes { count: 1, .. })
        ));
        assert_eq!(check_structure("f(x):x\"(ratio\"", '"'), Ok(()));
    }
}
