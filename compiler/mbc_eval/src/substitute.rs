use mbc_env::VariableTable;
use mbc_lexer::{Bracket, Token, TokenType};

/// Replaces each known variable by `( value )`. An identifier directly
/// followed by `(` names a function and is left alone, as are unknown
/// identifiers.
pub fn substitute_variables(tokens: &[Token], variables: &VariableTable) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let called = tokens.get(index + 1).is_some_and(Token::is_open_paren);
        let value = match &token.token_type {
            TokenType::Identifier(name) if !called => variables.get(name),
            _ => None,
        };
        match value {
            Some(value) => {
                out.push(Token::open(Bracket::Paren, token.offset));
                out.push(Token::number(value, token.offset));
                out.push(Token::close(Bracket::Paren, token.offset));
            }
            None => out.push(token.clone()),
        }
    }
    out
}
