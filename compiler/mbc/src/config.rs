use mbc_eval::ExpandConfig;
use mbc_parser::ConverterConfig;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest chain of function bodies expanding into each other.
    pub max_expansion_depth: usize,
    /// Deepest bracket nesting accepted in a statement or function body.
    pub max_nesting: usize,
    /// Require a closing bracket to match the kind of its opening bracket.
    pub strict_brackets: bool,
    /// Quote character around comments and definition descriptions.
    pub comment_delimiter: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_expansion_depth: 64,
            max_nesting: 256,
            strict_brackets: false,
            comment_delimiter: '"',
        }
    }
}

impl EngineConfig {
    pub fn with_max_expansion_depth(mut self, depth: usize) -> Self {
        self.max_expansion_depth = depth;
        self
    }

    pub fn with_max_nesting(mut self, nesting: usize) -> Self {
        self.max_nesting = nesting;
        self
    }

    pub fn with_strict_brackets(mut self, strict: bool) -> Self {
        self.strict_brackets = strict;
        self
    }

    pub fn with_comment_delimiter(mut self, delimiter: char) -> Self {
        self.comment_delimiter = delimiter;
        self
    }

    pub fn converter(&self) -> ConverterConfig {
        ConverterConfig {
            strict_brackets: self.strict_brackets,
            max_nesting: self.max_nesting,
        }
    }

    pub fn expansion(&self) -> ExpandConfig {
        ExpandConfig {
            max_depth: self.max_expansion_depth,
            converter: self.converter(),
        }
    }
}
