//! Grammar-driven tree construction.
//!
//! The [`Builder`] is a state machine fed one token at a time. It keeps an
//! explicit stack of open groups and arrays instead of recursing, so it can
//! be driven by any token source:
//!
//! ```text
//! file    := setting* END
//! setting := NAME '=' value ';'?
//!          | NAME group ';'?
//! value   := scalar | group | array
//! group   := '{' setting* '}'
//! array   := '[' (scalar (',' scalar)*)? ']'
//! ```
//!
//! Members are attached with the same primitive the mutation API uses, but
//! without the duplicate-name check: a file may repeat a name within a group.

use crate::config::Config;
use crate::error::{ConfigError, ParseResult};
use crate::lexer::{Spanned, Token};
use crate::setting::SettingId;
use crate::types::{SettingType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting a member name, a closing brace or end of input
    SettingStart,
    /// Saw a name; expecting '=' or '{'
    AfterName,
    /// Saw '='; expecting a value
    Value,
    /// A value finished; a terminator may follow
    AfterValue,
    /// Just opened an array
    ArrayOpen,
    /// Saw ',' inside an array
    ArrayElement,
    /// An array element finished
    AfterElement,
    /// End of input accepted
    Done,
}

/// Incremental builder that attaches parsed settings to a [`Config`]
pub struct Builder<'c> {
    config: &'c mut Config,
    /// Open containers; the bottom frame is the root group
    frames: Vec<SettingId>,
    state: State,
    pending_name: Option<String>,
    line: usize,
}

impl<'c> Builder<'c> {
    /// Start building into the root group of `config`
    pub fn new(config: &'c mut Config) -> Self {
        let root = config.root();
        Self {
            config,
            frames: vec![root],
            state: State::SettingStart,
            pending_name: None,
            line: 1,
        }
    }

    /// Line of the most recently fed token
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of groups and arrays currently open, excluding the root
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn current(&self) -> SettingId {
        self.frames[self.frames.len() - 1]
    }

    fn unexpected(&self, token: &Token) -> ConfigError {
        match token {
            Token::Garbage(text) => {
                ConfigError::parse(self.line, format!("syntax error, unexpected character '{}'", text))
            }
            Token::End if self.depth() > 0 => {
                ConfigError::parse(self.line, "syntax error, unexpected end of input in unterminated block")
            }
            _ => ConfigError::parse(self.line, format!("syntax error, unexpected {}", token)),
        }
    }

    fn scalar(token: &Token) -> Option<Value> {
        match token {
            Token::Boolean(b) => Some(Value::Bool(*b)),
            Token::Integer(i) => Some(Value::Int(*i)),
            Token::Float(f) => Some(Value::Float(*f)),
            Token::Str(s) => Some(Value::Str(s.clone())),
            _ => None,
        }
    }

    /// Consume one token
    pub fn feed(&mut self, spanned: Spanned) -> ParseResult<()> {
        self.line = spanned.line;
        let token = spanned.token;

        let scalar = Self::scalar(&token);

        self.state = match (self.state, &token, scalar) {
            (State::SettingStart | State::AfterValue, Token::Name(name), _) => {
                self.pending_name = Some(name.clone());
                State::AfterName
            }
            (State::AfterValue, Token::Newline, _) => State::SettingStart,
            (State::SettingStart | State::AfterValue, Token::GroupEnd, _) if self.depth() > 0 => {
                self.frames.pop();
                State::AfterValue
            }
            (State::SettingStart | State::AfterValue, Token::End, _) if self.depth() == 0 => {
                State::Done
            }

            (State::AfterName, Token::Equals, _) => State::Value,
            (State::AfterName | State::Value, Token::GroupStart, _) => {
                let group = self.attach_named(SettingType::Group)?;
                self.frames.push(group);
                State::SettingStart
            }
            (State::Value, Token::ArrayStart, _) => {
                let array = self.attach_named(SettingType::Array)?;
                self.frames.push(array);
                State::ArrayOpen
            }
            (State::Value, _, Some(value)) => {
                let setting = self.attach_named(SettingType::None)?;
                let line = self.line;
                self.config
                    .setting_mut(setting)
                    .ok_or_else(|| ConfigError::parse(line, "setting vanished during parse"))?
                    .assign(value)
                    .map_err(|e| ConfigError::parse(line, e.to_string()))?;
                State::AfterValue
            }

            (State::ArrayOpen | State::AfterElement, Token::ArrayEnd, _) => {
                self.frames.pop();
                State::AfterValue
            }
            (State::ArrayOpen | State::ArrayElement, _, Some(value)) => {
                let array = self.current();
                let line = self.line;
                self.config
                    .set_elem_value(array, None, value)
                    .map_err(|e| match e {
                        ConfigError::TypeMismatch { expected, found } => ConfigError::parse(
                            line,
                            format!(
                                "array element type mismatch: expected {}, found {}",
                                expected, found
                            ),
                        ),
                        other => ConfigError::parse(line, other.to_string()),
                    })?;
                State::AfterElement
            }
            (State::AfterElement, Token::Comma, _) => State::ArrayElement,

            _ => return Err(self.unexpected(&token)),
        };

        Ok(())
    }

    /// Feed every token in order, stopping at the first error
    pub fn feed_all(&mut self, tokens: impl IntoIterator<Item = Spanned>) -> ParseResult<()> {
        for token in tokens {
            self.feed(token)?;
            if self.state == State::Done {
                break;
            }
        }
        Ok(())
    }

    /// Check that the input formed a complete file
    pub fn finish(self) -> ParseResult<()> {
        if self.state == State::Done {
            Ok(())
        } else {
            Err(ConfigError::parse(self.line, "syntax error, unexpected end of input"))
        }
    }

    fn attach_named(&mut self, setting_type: SettingType) -> ParseResult<SettingId> {
        let parent = self.current();
        let name = self.pending_name.take();
        let line = self.line;

        self.config
            .create(parent, name, setting_type)
            .ok_or_else(|| ConfigError::parse(line, "cannot attach setting here"))
    }
}
