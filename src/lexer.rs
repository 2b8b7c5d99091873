use crate::error::{ConfigError, ParseResult};
use crate::escaping::unescape;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "libconf.pest"]
pub struct LibconfLexer;

/// A lexical token of the setting file format
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    Name(String),
    Equals,

    /// Setting terminator (`;`)
    Newline,
    ArrayStart,
    ArrayEnd,
    Comma,
    GroupStart,
    GroupEnd,

    /// End of input
    End,

    /// Any character the format does not recognise
    Garbage(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Boolean(b) => write!(f, "boolean {}", if *b { "TRUE" } else { "FALSE" }),
            Token::Integer(i) => write!(f, "integer {}", i),
            Token::Float(v) => write!(f, "float {}", v),
            Token::Str(_) => write!(f, "string"),
            Token::Name(n) => write!(f, "name '{}'", n),
            Token::Equals => write!(f, "'='"),
            Token::Newline => write!(f, "';'"),
            Token::ArrayStart => write!(f, "'['"),
            Token::ArrayEnd => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::GroupStart => write!(f, "'{{'"),
            Token::GroupEnd => write!(f, "'}}'"),
            Token::End => write!(f, "end of input"),
            Token::Garbage(g) => write!(f, "'{}'", g),
        }
    }
}

/// A token together with the 1-based line it starts on
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

impl LibconfLexer {
    /// Split input into tokens, always ending with [`Token::End`].
    ///
    /// Adjacent string literals are merged into one token.
    pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned>> {
        let pairs = LibconfLexer::parse(Rule::tokens, input)?;
        let mut tokens: Vec<Spanned> = Vec::new();

        for pair in pairs.flatten() {
            let line = pair.line_col().0;
            let text = pair.as_str();

            let token = match pair.as_rule() {
                Rule::boolean => Token::Boolean(text.eq_ignore_ascii_case("true")),
                Rule::integer => Token::Integer(Self::parse_integer(text, line)?),
                Rule::hex => Token::Integer(Self::parse_hex(text, line)?),
                Rule::float => Token::Float(Self::parse_float(text, line)?),
                Rule::string => {
                    let body = text
                        .strip_prefix('"')
                        .and_then(|s| s.strip_suffix('"'))
                        .unwrap_or(text);
                    let value = unescape(body);

                    if let Some(Spanned {
                        token: Token::Str(previous),
                        ..
                    }) = tokens.last_mut()
                    {
                        previous.push_str(&value);
                        continue;
                    }
                    Token::Str(value)
                }
                Rule::name => Token::Name(text.to_string()),
                Rule::equals => Token::Equals,
                Rule::terminator => Token::Newline,
                Rule::array_start => Token::ArrayStart,
                Rule::array_end => Token::ArrayEnd,
                Rule::comma => Token::Comma,
                Rule::group_start => Token::GroupStart,
                Rule::group_end => Token::GroupEnd,
                Rule::garbage => Token::Garbage(text.to_string()),
                Rule::EOI => Token::End,
                _ => continue,
            };

            tokens.push(Spanned { token, line });
        }

        if !matches!(tokens.last(), Some(Spanned { token: Token::End, .. })) {
            let line = input.lines().count().max(1);
            tokens.push(Spanned {
                token: Token::End,
                line,
            });
        }

        Ok(tokens)
    }

    fn parse_integer(text: &str, line: usize) -> ParseResult<i64> {
        text.parse::<i64>()
            .map_err(|_| ConfigError::parse(line, format!("integer value out of range: {}", text)))
    }

    /// Hex literals denote bit patterns, so values up to 64 bits wrap into i64
    fn parse_hex(text: &str, line: usize) -> ParseResult<i64> {
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let digits = &unsigned[2..];

        let bits = u64::from_str_radix(digits, 16)
            .map_err(|_| ConfigError::parse(line, format!("integer value out of range: {}", text)))?;
        let value = bits as i64;

        Ok(if negative { value.wrapping_neg() } else { value })
    }

    fn parse_float(text: &str, line: usize) -> ParseResult<f64> {
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(ConfigError::parse(
                line,
                format!("float value out of range: {}", text),
            )),
            Err(_) => Err(ConfigError::parse(line, format!("invalid float: {}", text))),
        }
    }
}
