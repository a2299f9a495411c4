//! Reserved words of the tool configuration language.

use crate::tools::ToolKind;
use std::fmt;

/// Style options accepted inside a tool's parenthesised clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOption {
    Color,
    Width,
    ArrowSize,
    MinWidth,
    MaxWidth,
}

impl StyleOption {
    pub fn name(self) -> &'static str {
        match self {
            StyleOption::Color => "color",
            StyleOption::Width => "width",
            StyleOption::ArrowSize => "arrowsize",
            StyleOption::MinWidth => "minwidth",
            StyleOption::MaxWidth => "maxwidth",
        }
    }
}

/// Key roles that can be assigned at top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `hotkey`: toggles the overlay
    Toggle,
    /// `undokey`: undoes the last stroke
    Undo,
}

impl BindingKind {
    pub fn name(self) -> &'static str {
        match self {
            BindingKind::Toggle => "hotkey",
            BindingKind::Undo => "undokey",
        }
    }
}

/// Semantic tag of a reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Tool(ToolKind),
    Option(StyleOption),
    Binding(BindingKind),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::Tool(kind) => kind.name(),
            Symbol::Option(option) => option.name(),
            Symbol::Binding(binding) => binding.name(),
        };
        f.write_str(name)
    }
}

/// Spelling → tag table. `size`, `minsize` and `maxsize` are accepted as
/// older spellings of the width options.
static RESERVED_WORDS: &[(&str, Symbol)] = &[
    ("pen", Symbol::Tool(ToolKind::Pen)),
    ("line", Symbol::Tool(ToolKind::Line)),
    ("arrow", Symbol::Tool(ToolKind::Arrow)),
    ("rect", Symbol::Tool(ToolKind::RectOutline)),
    ("fillrect", Symbol::Tool(ToolKind::RectFilled)),
    ("eraser", Symbol::Tool(ToolKind::Eraser)),
    ("recolor", Symbol::Tool(ToolKind::Recolor)),
    ("color", Symbol::Option(StyleOption::Color)),
    ("width", Symbol::Option(StyleOption::Width)),
    ("size", Symbol::Option(StyleOption::Width)),
    ("arrowsize", Symbol::Option(StyleOption::ArrowSize)),
    ("minwidth", Symbol::Option(StyleOption::MinWidth)),
    ("minsize", Symbol::Option(StyleOption::MinWidth)),
    ("maxwidth", Symbol::Option(StyleOption::MaxWidth)),
    ("maxsize", Symbol::Option(StyleOption::MaxWidth)),
    ("hotkey", Symbol::Binding(BindingKind::Toggle)),
    ("undokey", Symbol::Binding(BindingKind::Undo)),
];

/// Looks up a bare word, ignoring ASCII case.
pub fn lookup(word: &str) -> Option<Symbol> {
    RESERVED_WORDS
        .iter()
        .find(|(spelling, _)| spelling.eq_ignore_ascii_case(word))
        .map(|(_, symbol)| *symbol)
}
