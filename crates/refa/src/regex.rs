// expression surface syntax:
// <symbol>      alphanumeric character
// ε             the empty string
// ∅             the empty language
// a|b, a+b      union ('+' is rewritten to '|' when the value is built)
// ab, a.b       concatenation, usually implicit
// a*            Kleene star
// (a)           grouping

use std::{fmt, fs, io, path::Path};

use crate::alphabet::{is_symbol_char, EMPTY_SET_GLYPH, EPSILON_GLYPH};
use crate::error::{SourceError, SyntaxError};

/// One token of a postfix (reverse Polish) expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(char),
    Epsilon,
    EmptySet,
    Concat,
    Union,
    Star,
}

impl Token {
    pub fn is_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Epsilon | Token::EmptySet)
    }

    fn priority(self) -> u8 {
        match self {
            Token::Star => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Epsilon => EPSILON_GLYPH,
            Token::EmptySet => EMPTY_SET_GLYPH,
            Token::Concat => '.',
            Token::Union => '|',
            Token::Star => '*',
        }
    }
}

// infix stream, parentheses only live here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Infix {
    Token(Token),
    Open,
    Close,
}

impl Infix {
    // a, ) and * can end an operand
    fn ends_operand(self) -> bool {
        match self {
            Infix::Token(t) => t.is_operand() || t == Token::Star,
            Infix::Close => true,
            Infix::Open => false,
        }
    }

    fn starts_operand(self) -> bool {
        match self {
            Infix::Token(t) => t.is_operand(),
            Infix::Open => true,
            Infix::Close => false,
        }
    }

    fn as_char(self) -> char {
        match self {
            Infix::Token(t) => t.as_char(),
            Infix::Open => '(',
            Infix::Close => ')',
        }
    }
}

/// Expression in postfix order, as consumed by the Thompson builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Postfix(tokens)
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            write!(f, "{}", token.as_char())?;
        }
        Ok(())
    }
}

/// A regular expression value. The text is normalized when the value is
/// built and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Regex {
    data: String,
}

impl Regex {
    pub fn new(text: &str) -> Regex {
        Regex {
            data: text.trim().replace('+', "|"),
        }
    }

    /// Expression denoting the empty language.
    pub fn empty_language() -> Regex {
        Regex {
            data: EMPTY_SET_GLYPH.to_string(),
        }
    }

    /// Reads an expression from `source`. A leading `@` or a string naming an
    /// existing file selects the trimmed file contents, anything else is used
    /// as the expression text itself.
    pub fn from_source(source: &str) -> Result<Regex, SourceError> {
        let path = match source.strip_prefix('@') {
            Some(path) => Path::new(path),
            None if Path::new(source).is_file() => Path::new(source),
            None => return Ok(Regex::new(source)),
        };

        match fs::read_to_string(path) {
            Ok(contents) => Ok(Regex::new(&contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.to_path_buf()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn lex(&self) -> Result<Vec<Infix>, SyntaxError> {
        self.data
            .chars()
            .map(|c| match c {
                '(' => Ok(Infix::Open),
                ')' => Ok(Infix::Close),
                '*' => Ok(Infix::Token(Token::Star)),
                '.' => Ok(Infix::Token(Token::Concat)),
                '|' => Ok(Infix::Token(Token::Union)),
                EPSILON_GLYPH => Ok(Infix::Token(Token::Epsilon)),
                EMPTY_SET_GLYPH => Ok(Infix::Token(Token::EmptySet)),
                c if is_symbol_char(c) => Ok(Infix::Token(Token::Symbol(c))),
                c => Err(SyntaxError::UnknownCharacter(c)),
            })
            .collect()
    }

    fn with_concat(infix: Vec<Infix>) -> Vec<Infix> {
        let mut result: Vec<Infix> = Vec::with_capacity(infix.len() * 2);
        for current in infix {
            if let Some(&prev) = result.last() {
                if prev.ends_operand() && current.starts_operand() {
                    result.push(Infix::Token(Token::Concat));
                }
            }
            result.push(current);
        }
        result
    }

    /// The expression with every implicit concatenation written out as `.`.
    pub fn explicit_concat(&self) -> Result<String, SyntaxError> {
        let infix = Self::with_concat(self.lex()?);
        Ok(infix.into_iter().map(Infix::as_char).collect())
    }

    /// Converts the expression to postfix with the shunting-yard algorithm.
    pub fn to_postfix(&self) -> Result<Postfix, SyntaxError> {
        let infix = Self::with_concat(self.lex()?);
        let mut output: Vec<Token> = Vec::with_capacity(infix.len());
        let mut operators: Vec<Infix> = Vec::new();
        let mut open_groups: usize = 0;

        for (i, &item) in infix.iter().enumerate() {
            match item {
                Infix::Token(token) if token.is_operand() => output.push(token),
                Infix::Open => {
                    operators.push(item);
                    open_groups += 1;
                }
                Infix::Close => {
                    if open_groups == 0 {
                        return Err(SyntaxError::UnmatchedClose);
                    }
                    open_groups -= 1;
                    loop {
                        match operators.pop() {
                            Some(Infix::Open) => break,
                            Some(Infix::Token(op)) => output.push(op),
                            Some(Infix::Close) | None => return Err(SyntaxError::UnmatchedClose),
                        }
                    }
                }
                Infix::Token(op) => {
                    if op == Token::Star {
                        Self::check_star(&infix, i)?;
                    }
                    while let Some(&Infix::Token(top)) = operators.last() {
                        if top.priority() < op.priority() {
                            break;
                        }
                        output.push(top);
                        operators.pop();
                    }
                    operators.push(item);
                }
            }
        }

        if open_groups != 0 {
            return Err(SyntaxError::UnmatchedOpen);
        }

        while let Some(item) = operators.pop() {
            match item {
                Infix::Token(op) => output.push(op),
                Infix::Open | Infix::Close => return Err(SyntaxError::UnmatchedOpen),
            }
        }

        log::debug!("postfix of `{}` has {} tokens", self.data, output.len());
        Ok(Postfix(output))
    }

    fn check_star(infix: &[Infix], i: usize) -> Result<(), SyntaxError> {
        match i.checked_sub(1).map(|j| infix[j]) {
            Some(Infix::Token(Token::Star)) => return Err(SyntaxError::DoubledStar),
            Some(prev) if prev.ends_operand() => {}
            _ => return Err(SyntaxError::MisplacedStar),
        }
        if infix.get(i + 1) == Some(&Infix::Token(Token::Star)) {
            return Err(SyntaxError::DoubledStar);
        }
        Ok(())
    }

    /// Strips empty groups and empty alternatives until nothing changes.
    pub fn fix(&self) -> Regex {
        let mut current = self.data.clone();
        loop {
            let mut next = current
                .replace("()", "")
                .replace("(|", "(")
                .replace("|)", ")");
            if let Some(rest) = next.strip_prefix('|') {
                next = rest.to_owned();
            }
            if let Some(rest) = next.strip_suffix('|') {
                next = rest.to_owned();
            }

            if next == current {
                break;
            }
            current = next;
        }
        Regex { data: current }
    }
}

impl From<&str> for Regex {
    fn from(text: &str) -> Self {
        Regex::new(text)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
