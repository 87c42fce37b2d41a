use logos::Logos;

/// Raw lexemes recognised by logos. [`crate::Lexer`] turns them into
/// [`crate::Token`]s, expanding SI suffixes and folding negative literals.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum LogosToken {
    // Scientific notation. An uppercase `E` needs an explicit sign, otherwise
    // it is the exa prefix and lexes as `SiNumber`.
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)(E[+-]|e[+-]?)[0-9]+")]
    Scientific,

    // Number immediately followed by an SI prefix letter (or `da`)
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)(da|[YZEPTGMkhdcmunpfazy])")]
    SiNumber,

    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Operators (logos prefers the longest match, so `**` wins over `*`)
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("&&")]
    AndAnd,
    #[token("&")]
    BitAnd,
    #[token("^^")]
    CaretCaret,
    #[token("^")]
    BitXor,
    #[token("||")]
    OrOr,
    #[token("|")]
    BitOr,
    #[token("!")]
    Bang,

    #[token("=")]
    Equal,
    #[token(",")]
    Comma,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
}
