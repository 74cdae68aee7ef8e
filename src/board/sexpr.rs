//! Minimal S-expression reader for KiCad files.
//!
//! Bare atoms keep their source text; numbers are parsed on demand so that
//! fields like `(fp_text value 100 ...)` stay exactly as written.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// A parsed S-expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// Unquoted atom, source text as written
    Symbol(String),
    /// Quoted string, escapes resolved
    String(String),
    List(Vec<Sexpr>),
}

impl Sexpr {
    /// Text of an atom, quoted or not.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) | Sexpr::String(s) => Some(s),
            Sexpr::List(_) => None,
        }
    }

    /// Symbol name if this is an unquoted atom.
    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric value of a bare atom.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_sym()?.parse().ok()
    }

    /// Head symbol of a list, e.g. `at` for `(at 1 2)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_sym()
    }

    /// Direct child lists of this list.
    pub fn children(&self) -> impl Iterator<Item = &Sexpr> {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .skip(1)
            .filter(|c| c.as_list().is_some())
    }

    /// First direct child list with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Sexpr> {
        self.children().find(|c| c.tag() == Some(tag))
    }
}

/// Errors that can occur while reading S-expressions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected '{0}' at byte {1}")]
    UnexpectedChar(char, usize),
    #[error("Unclosed list starting at byte {0}")]
    UnclosedList(usize),
    #[error("Unterminated string starting at byte {0}")]
    UnterminatedString(usize),
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    fn parse(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            None => Err(ParseError::UnexpectedEof),
            Some((pos, '(')) => {
                self.chars.next();
                self.parse_list(pos)
            }
            Some((pos, ')')) => Err(ParseError::UnexpectedChar(')', pos)),
            Some((pos, '"')) => {
                self.chars.next();
                self.parse_string(pos)
            }
            Some(_) => Ok(self.parse_symbol()),
        }
    }

    fn parse_list(&mut self, start: usize) -> Result<Sexpr, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => return Err(ParseError::UnclosedList(start)),
                Some((_, ')')) => {
                    self.chars.next();
                    break;
                }
                Some(_) => items.push(self.parse()?),
            }
        }

        if items.len() >= 1000 {
            log::trace!("Parsed list of {} items at byte {start}", items.len());
        }

        Ok(Sexpr::List(items))
    }

    fn parse_string(&mut self, start: usize) -> Result<Sexpr, ParseError> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some((_, '"')) => break,
                Some((_, '\\')) => match self.chars.next() {
                    None => return Err(ParseError::UnterminatedString(start)),
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, ch)) => out.push(ch),
                },
                Some((_, ch)) => out.push(ch),
            }
        }
        Ok(Sexpr::String(out))
    }

    fn parse_symbol(&mut self) -> Sexpr {
        let mut out = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            out.push(ch);
            self.chars.next();
        }
        Sexpr::Symbol(out)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else if ch == ';' {
                // Comment runs to end of line
                for (_, c) in self.chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }
}

/// Parse a single S-expression. Trailing content after it is ignored.
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    log::trace!("Parsing S-expression from {} bytes of input", input.len());
    Parser::new(input).parse()
}
