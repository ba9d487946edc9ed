// src/format/mod.rs

//! strftime-like timestamp formats.
//!
//! A format string is compiled once into literal text and [`Directive`]s.
//! The same compiled format is then rendered either against an instant in a
//! time zone (absolute mode) or against a [`std::time::Duration`] (elapsed
//! and incremental modes).
//!
//! - [`directive`] holds the table of recognised directives.
//! - [`render`] turns compiled tokens into text.

pub mod directive;
pub mod render;

use std::fmt;

use thiserror::Error;

pub use directive::Directive;

/// What a compiled format will be rendered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Instant,
    Duration,
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Instant => f.write_str("absolute"),
            RenderTarget::Duration => f.write_str("elapsed/incremental"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown directive '%{0}'")]
    UnknownDirective(char),

    #[error("format ends with a lone '%'")]
    DanglingPercent,

    #[error("directive '{directive}' cannot be used in {target} timestamps")]
    NotApplicable {
        directive: &'static str,
        target: RenderTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Field(Directive),
}

/// A format string compiled for one [`RenderTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    source: String,
    tokens: Vec<Token>,
}

impl TimeFormat {
    /// Compile `source` for rendering against `target`.
    ///
    /// Fails on unknown directives, a trailing lone `%`, and (for
    /// durations) directives that only make sense for calendar instants.
    pub fn compile(source: &str, target: RenderTarget) -> Result<Self, FormatError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let directive = match chars.next() {
                None => return Err(FormatError::DanglingPercent),
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('n') => {
                    literal.push('\n');
                    continue;
                }
                Some('t') => {
                    literal.push('\t');
                    continue;
                }
                Some(':') => match chars.next() {
                    Some('z') => Directive::OffsetColon,
                    Some(_) => return Err(FormatError::UnknownDirective(':')),
                    None => return Err(FormatError::DanglingPercent),
                },
                Some(other) => {
                    Directive::from_char(other).ok_or(FormatError::UnknownDirective(other))?
                }
            };

            if target == RenderTarget::Duration && !directive.applies_to_duration() {
                return Err(FormatError::NotApplicable {
                    directive: directive.spec(),
                    target,
                });
            }

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field(directive));
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Directives in the order they appear.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Field(d) => Some(*d),
            Token::Literal(_) => None,
        })
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
