//! Statement-level parser for the tool configuration language.
//!
//! ```text
//! config     := { statement }
//! statement  := tool_def | hotkey_def
//! tool_def   := STRING (TOOL_TYPE | STRING) [ style_clause ] ";"
//! hotkey_def := ("hotkey" | "undokey") "=" STRING ";"
//! ```
//!
//! Parsing stops at the first error; there is no recovery. Everything parsed
//! so far lives in a staging [`ToolConfig`] owned by the parser, so an error
//! simply drops it (and with it every paint context created for it).

use super::error::ParseError;
use super::keybindings::KeyBinding;
use super::lexer::{Punct, TokenKind, TokenStream};
use super::style::parse_style_clause;
use super::symbols::{BindingKind, Symbol};
use crate::paint::PaintContextFactory;
use crate::tools::{StyleDef, ToolConfig, ToolEntry, ToolId};
use log::debug;
use std::sync::Arc;

/// A fully parsed statement waiting for its terminating `;`.
enum Pending {
    Tool {
        id: ToolId,
        style: StyleDef,
        line: usize,
    },
    Hotkey {
        binding: BindingKind,
        key: String,
    },
}

enum State {
    ExpectStatement,
    ToolDef { name: String, line: usize },
    HotkeyDef(BindingKind),
    ExpectSemicolon(Pending),
    Done,
}

/// Parser over one config source, staging results as it goes.
pub struct Parser<'a> {
    tokens: TokenStream<'a>,
    factory: Arc<dyn PaintContextFactory>,
    staging: ToolConfig,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, factory: &Arc<dyn PaintContextFactory>) -> Self {
        Self {
            tokens: TokenStream::new(source),
            factory: Arc::clone(factory),
            staging: ToolConfig::default(),
        }
    }

    /// Runs the statement loop to the end of input or the first error.
    pub fn parse(mut self) -> Result<ToolConfig, ParseError> {
        let mut state = State::ExpectStatement;
        loop {
            state = match state {
                State::ExpectStatement => self.expect_statement()?,
                State::ToolDef { name, line } => {
                    State::ExpectSemicolon(self.parse_tool_def(&name, line)?)
                }
                State::HotkeyDef(binding) => {
                    State::ExpectSemicolon(self.parse_hotkey_def(binding)?)
                }
                State::ExpectSemicolon(pending) => {
                    self.tokens.expect_punct(Punct::Semicolon)?;
                    self.commit(pending);
                    State::ExpectStatement
                }
                State::Done => return Ok(self.staging),
            };
        }
    }

    fn expect_statement(&mut self) -> Result<State, ParseError> {
        let token = self.tokens.advance()?;
        match token.kind {
            TokenKind::Eof => Ok(State::Done),
            TokenKind::Str(name) => Ok(State::ToolDef {
                name,
                line: token.line,
            }),
            TokenKind::Symbol(Symbol::Binding(binding)) => Ok(State::HotkeyDef(binding)),
            other => Err(ParseError::syntax(
                token.line,
                "tool name or hotkey definition",
                other.to_string(),
            )),
        }
    }

    fn parse_tool_def(&mut self, name: &str, line: usize) -> Result<Pending, ParseError> {
        let id = parse_name(name, line)?;

        let token = self.tokens.advance()?;
        let mut style = match token.kind {
            TokenKind::Symbol(Symbol::Tool(kind)) => StyleDef::defaults_for(kind),
            TokenKind::Str(base) => match self.staging.lookup_tool(&base) {
                Some(entry) => entry.style().clone(),
                None => {
                    return Err(ParseError::UnknownTool {
                        line: token.line,
                        name: base,
                    });
                }
            },
            other => {
                return Err(ParseError::syntax(token.line, "tool type", other.to_string()));
            }
        };

        if self.tokens.peek()?.kind == TokenKind::Punct(Punct::LParen) {
            parse_style_clause(&mut self.tokens, &mut style)?;
        }

        if !style.width_bounds_valid() {
            return Err(ParseError::WidthBounds {
                line,
                tool: id.as_str().to_string(),
                minwidth: style.minwidth,
                maxwidth: style.maxwidth,
            });
        }

        Ok(Pending::Tool { id, style, line })
    }

    fn parse_hotkey_def(&mut self, binding: BindingKind) -> Result<Pending, ParseError> {
        self.tokens.expect_punct(Punct::Equals)?;

        let token = self.tokens.advance()?;
        let key = match token.kind {
            TokenKind::Str(key) => key,
            other => {
                return Err(ParseError::syntax(
                    token.line,
                    format!("key name string after '{} ='", binding.name()),
                    other.to_string(),
                ));
            }
        };

        if let Err(err) = KeyBinding::parse(&key) {
            return Err(ParseError::InvalidKey {
                line: token.line,
                key,
                reason: err.to_string(),
            });
        }

        Ok(Pending::Hotkey { binding, key })
    }

    fn commit(&mut self, pending: Pending) {
        match pending {
            Pending::Tool { id, style, line } => {
                debug!("Line {line}: {} tool '{}'", style.tool, id.as_str());
                let entry = ToolEntry::create(style, &self.factory);
                let name = id.as_str().to_string();
                if self.staging.tools.insert(id, entry).is_some() {
                    debug!("Line {line}: '{name}' replaces an earlier definition");
                }
            }
            Pending::Hotkey { binding, key } => {
                debug!("{} = {key}", binding.name());
                match binding {
                    BindingKind::Toggle => self.staging.bindings.toggle = Some(key),
                    BindingKind::Undo => self.staging.bindings.undo = Some(key),
                }
            }
        }
    }
}

/// Turns the quoted name of a tool definition into its identifier.
///
/// The name is kept exactly as written; only empty names are rejected.
pub fn parse_name(name: &str, line: usize) -> Result<ToolId, ParseError> {
    if name.is_empty() {
        return Err(ParseError::EmptyToolName { line });
    }
    Ok(ToolId::new(name))
}

/// Parses a whole config source into a [`ToolConfig`].
pub fn parse_config(
    source: &str,
    factory: &Arc<dyn PaintContextFactory>,
) -> Result<ToolConfig, ParseError> {
    Parser::new(source, factory).parse()
}

#[cfg(test)]
mod tests;
