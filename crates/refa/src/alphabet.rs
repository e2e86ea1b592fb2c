use std::fmt;

/// Glyph for the empty string inside synthesized expressions.
pub const EPSILON_GLYPH: char = 'ε';
/// Glyph for the empty language.
pub const EMPTY_SET_GLYPH: char = '∅';

/// Label on an automaton edge.
///
/// `Epsilon` orders before every real symbol, so sorted listings put
/// epsilon edges first, the same place an empty string would sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(c),
        }
    }

    /// Label used by state elimination, where epsilon has to be visible.
    pub(crate) fn regex_label(self) -> String {
        match self {
            Symbol::Epsilon => EPSILON_GLYPH.to_string(),
            Symbol::Char(c) => c.to_string(),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

// epsilon prints as the empty string, which is also how the text format spells it
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => Ok(()),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Characters that can be used as input symbols.
pub fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() && c != EPSILON_GLYPH
}
