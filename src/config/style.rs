//! Parsing of the parenthesised style clause attached to a tool definition.
//!
//! ```text
//! style_clause := "(" style_opt { "," style_opt } ")"
//! style_opt    := OPTION "=" (STRING | NUMBER)
//! ```
//!
//! Values are range-checked as they are read; nothing is clamped.

use super::error::ParseError;
use super::lexer::{Punct, TokenKind, TokenStream};
use super::symbols::{StyleOption, Symbol};
use crate::draw::Color;
use crate::tools::StyleDef;
use log::warn;

/// Parses a complete style clause, starting at `(`, into `style`.
///
/// Options override whatever `style` already holds; an option given twice
/// keeps the last value.
pub fn parse_style_clause(
    tokens: &mut TokenStream<'_>,
    style: &mut StyleDef,
) -> Result<(), ParseError> {
    tokens.expect_punct(Punct::LParen)?;

    loop {
        parse_style_option(tokens, style)?;

        let token = tokens.advance()?;
        match token.kind {
            TokenKind::Punct(Punct::Comma) => {}
            TokenKind::Punct(Punct::RParen) => return Ok(()),
            other => return Err(ParseError::syntax(token.line, "',' or ')'", other.to_string())),
        }
    }
}

fn parse_style_option(tokens: &mut TokenStream<'_>, style: &mut StyleDef) -> Result<(), ParseError> {
    let token = tokens.advance()?;
    let option = match token.kind {
        TokenKind::Symbol(Symbol::Option(option)) => option,
        TokenKind::Symbol(symbol) => {
            return Err(ParseError::UnknownOption {
                line: token.line,
                name: symbol.to_string(),
            });
        }
        TokenKind::Identifier(name) => {
            return Err(ParseError::UnknownOption {
                line: token.line,
                name,
            });
        }
        other => return Err(ParseError::syntax(token.line, "style option", other.to_string())),
    };

    tokens.expect_punct(Punct::Equals)?;

    let value = tokens.advance()?;
    let line = value.line;
    match (option, value.kind) {
        (StyleOption::Color, TokenKind::Str(spec)) => {
            let color = Color::parse(&spec).ok_or(ParseError::InvalidColor { line, spec })?;
            if style.tool.uses_color() {
                style.color = Some(color);
            } else {
                warn!("Line {line}: color has no effect on {} tools, ignoring", style.tool);
            }
        }
        (StyleOption::Color, other) => {
            return Err(ParseError::syntax(line, "color string", other.to_string()));
        }
        (option, TokenKind::Number(value)) => apply_number(style, option, value, line)?,
        (option, other) => {
            return Err(ParseError::syntax(
                line,
                format!("number for {}", option.name()),
                other.to_string(),
            ));
        }
    }

    Ok(())
}

fn apply_number(
    style: &mut StyleDef,
    option: StyleOption,
    value: f64,
    line: usize,
) -> Result<(), ParseError> {
    let out_of_range = |reason| ParseError::OutOfRange {
        line,
        option: option.name(),
        value,
        reason,
    };

    if value < 0.0 {
        return Err(out_of_range("must not be negative"));
    }
    if !value.is_finite() {
        return Err(out_of_range("too large"));
    }

    // Pixel widths are whole numbers; fractions round half up.
    let pixels = || {
        let rounded = (value + 0.5).floor();
        if rounded > u32::MAX as f64 {
            Err(out_of_range("too large"))
        } else {
            Ok(rounded as u32)
        }
    };

    match option {
        StyleOption::ArrowSize => style.arrowsize = value,
        StyleOption::Width => {
            let width = pixels()?;
            if width == 0 {
                return Err(out_of_range("must be at least 1"));
            }
            style.width = width;
        }
        StyleOption::MinWidth => style.minwidth = pixels()?,
        StyleOption::MaxWidth => style.maxwidth = pixels()?,
        // color values are strings and never reach here
        StyleOption::Color => {}
    }

    Ok(())
}
