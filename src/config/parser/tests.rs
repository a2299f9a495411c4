use super::*;
use crate::config::error::{ErrorKind, LexError};
use crate::draw::color::{BLUE, RED};
use crate::paint::ContextRegistry;
use crate::tools::{ToolKind, style};

fn registry() -> (Arc<ContextRegistry>, Arc<dyn PaintContextFactory>) {
    let registry = Arc::new(ContextRegistry::new());
    let factory: Arc<dyn PaintContextFactory> = registry.clone();
    (registry, factory)
}

fn parse_ok(source: &str) -> ToolConfig {
    let (_, factory) = registry();
    parse_config(source, &factory).unwrap()
}

fn parse_err(source: &str) -> ParseError {
    let (registry, factory) = registry();
    let err = parse_config(source, &factory).unwrap_err();
    assert_eq!(registry.live_count(), 0, "failed parse leaked contexts");
    err
}

#[test]
fn line_tool_with_style_and_hotkey() {
    let config = parse_ok(r#""mouse:left" line (width=4, color="red"); hotkey = "F9";"#);

    assert_eq!(config.tools.len(), 1);
    let entry = config.lookup_tool("mouse:left").unwrap();
    assert_eq!(entry.tool(), ToolKind::Line);
    assert_eq!(entry.width(), 4);
    assert_eq!(entry.color(), Some(RED));
    assert_eq!(entry.arrowsize(), 0.0);
    assert_eq!(entry.minwidth(), style::DEFAULT_MIN_WIDTH);
    assert_eq!(entry.maxwidth(), style::DEFAULT_MAX_WIDTH);
    assert_eq!(config.toggle_key(), Some("F9"));
    assert_eq!(config.undo_key(), None);
}

#[test]
fn later_definition_replaces_earlier() {
    let (registry, factory) = registry();
    let config = parse_config(r#""pen" arrow (arrowsize=2.5); "pen" eraser;"#, &factory).unwrap();

    assert_eq!(config.tools.len(), 1);
    let entry = config.lookup_tool("pen").unwrap();
    assert_eq!(entry.style(), &StyleDef::defaults_for(ToolKind::Eraser));
    assert_eq!(registry.live_count(), 1);
}

#[test]
fn definition_without_clause_uses_type_defaults() {
    let kinds = [
        ("pen", ToolKind::Pen),
        ("line", ToolKind::Line),
        ("arrow", ToolKind::Arrow),
        ("rect", ToolKind::RectOutline),
        ("fillrect", ToolKind::RectFilled),
        ("eraser", ToolKind::Eraser),
        ("recolor", ToolKind::Recolor),
    ];
    for (spelling, kind) in kinds {
        let config = parse_ok(&format!("\"t\" {spelling};"));
        assert_eq!(
            config.lookup_tool("t").map(ToolEntry::style),
            Some(&StyleDef::defaults_for(kind)),
            "defaults for {spelling}"
        );
    }
}

#[test]
fn identifiers_are_kept_verbatim() {
    let names = ["mouse:left", "Wacom Intuos Pen:eraser", " spaced ", "a:b:c", "ünïcode"];
    for name in names {
        let config = parse_ok(&format!("\"{name}\" pen;"));
        let (stored, _) = config.tools.iter().next().unwrap();
        assert_eq!(stored, name);
        assert!(config.lookup_tool(name).is_some());
    }
}

#[test]
fn negative_width_is_semantic_error() {
    let err = parse_err(r#""bad" line (width=-1);"#);
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert!(err.to_string().contains("width"));
}

#[test]
fn unterminated_string_is_lex_error() {
    let err = parse_err(r#""unterminated line (width=1);"#);
    assert_eq!(
        err,
        ParseError::Lex {
            line: 1,
            source: LexError::UnterminatedString
        }
    );
}

#[test]
fn missing_final_semicolon_is_syntax_error() {
    let err = parse_err(r#""x" line; undokey = "BackSpace""#);
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.to_string().starts_with("expected ';'"), "{err}");
}

#[test]
fn empty_input_gives_empty_config() {
    for source in ["", "   \n\t", "# only a comment\n/* and a block */"] {
        let config = parse_ok(source);
        assert!(config.tools.is_empty());
        assert_eq!(config.bindings, Default::default());
    }
}

#[test]
fn failure_after_several_tools_releases_all_contexts() {
    let err = parse_err(
        r#"
        "a" pen;
        "b" line (width=3);
        "a" arrow;
        "c" rect (color="nope");
        "#,
    );
    assert_eq!(err, ParseError::InvalidColor { line: 5, spec: "nope".into() });
}

#[test]
fn statement_must_start_with_name_or_binding() {
    for source in ["line;", "42;", "= \"x\";", "(width=1);", "thickness;"] {
        let err = parse_err(source);
        assert_eq!(err.kind(), ErrorKind::Syntax, "{source}");
        assert!(
            err.to_string()
                .starts_with("expected tool name or hotkey definition"),
            "{source}: {err}"
        );
    }
}

#[test]
fn unknown_tool_type_is_syntax_error_naming_token() {
    let err = parse_err(r#""x" brush;"#);
    assert_eq!(
        err,
        ParseError::Syntax {
            line: 1,
            expected: "tool type".into(),
            found: "identifier 'brush'".into(),
        }
    );

    let err = parse_err(r#""x" width;"#);
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn semicolon_required_after_tool_and_clause() {
    let err = parse_err("\"x\" line (width=2)\n\"y\" pen;");
    assert_eq!(
        err,
        ParseError::Syntax {
            line: 2,
            expected: "';'".into(),
            found: "string \"y\"".into(),
        }
    );
}

#[test]
fn hotkey_assignments_overwrite() {
    let config = parse_ok(
        r#"
        hotkey = "F9";
        undokey = "F10";
        HOTKEY = "Ctrl+F12";
        "#,
    );
    assert_eq!(config.toggle_key(), Some("Ctrl+F12"));
    assert_eq!(config.undo_key(), Some("F10"));
    let toggle = config.bindings.toggle_binding().unwrap();
    assert!(toggle.ctrl);
    assert_eq!(toggle.key, "F12");
}

#[test]
fn hotkey_requires_equals_and_string() {
    let err = parse_err(r#"hotkey "F9";"#);
    assert_eq!(
        err,
        ParseError::Syntax {
            line: 1,
            expected: "'='".into(),
            found: "string \"F9\"".into(),
        }
    );

    let err = parse_err("undokey = 9;");
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.to_string().contains("key name string"));

    let err = parse_err(r#"hotkey = "F9""#);
    assert!(err.to_string().starts_with("expected ';'"));
}

#[test]
fn empty_hotkey_is_rejected() {
    let err = parse_err(r#"hotkey = "";"#);
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert!(matches!(err, ParseError::InvalidKey { .. }));
}

#[test]
fn empty_tool_name_is_rejected() {
    let err = parse_err(r#""" pen;"#);
    assert_eq!(err, ParseError::EmptyToolName { line: 1 });
}

#[test]
fn min_width_above_max_width_is_rejected() {
    let err = parse_err("\"p\" pen\n(minwidth=10, maxwidth=5);");
    assert_eq!(
        err,
        ParseError::WidthBounds {
            line: 1,
            tool: "p".into(),
            minwidth: 10,
            maxwidth: 5,
        }
    );
}

#[test]
fn tool_can_inherit_an_earlier_definition() {
    let config = parse_ok(
        r#"
        "base" arrow (color="blue", width=5, arrowsize=3);
        "derived" "base" (width=9);
        "copy" "base";
        "#,
    );

    let derived = config.lookup_tool("derived").unwrap();
    assert_eq!(derived.tool(), ToolKind::Arrow);
    assert_eq!(derived.color(), Some(BLUE));
    assert_eq!(derived.width(), 9);
    assert_eq!(derived.arrowsize(), 3.0);

    let copy = config.lookup_tool("copy").unwrap();
    assert_eq!(copy.style(), config.lookup_tool("base").unwrap().style());
    assert_ne!(copy.context().id(), config.lookup_tool("base").unwrap().context().id());
}

#[test]
fn inheriting_an_undefined_tool_fails() {
    let err = parse_err("\"a\" pen;\n\"b\" \"missing\";");
    assert_eq!(
        err,
        ParseError::UnknownTool {
            line: 2,
            name: "missing".into()
        }
    );
}

#[test]
fn paint_contexts_receive_final_style() {
    let (registry, factory) = registry();
    let config = parse_config(r##""p" pen (color="#0000ff", width=2);"##, &factory).unwrap();
    let entry = config.lookup_tool("p").unwrap();

    assert_eq!(registry.style_of(entry.context().id()).as_ref(), Some(entry.style()));
    assert_eq!(entry.color(), Some(BLUE));
}

#[test]
fn parse_name_accepts_any_non_empty_string() {
    assert_eq!(parse_name("dev:tool", 3).unwrap().as_str(), "dev:tool");
    assert_eq!(parse_name("", 3), Err(ParseError::EmptyToolName { line: 3 }));
}

#[test]
fn lex_errors_stop_parsing_mid_file() {
    let err = parse_err("\"a\" pen;\n\"b\" line (width=1.2.3);");
    assert_eq!(
        err,
        ParseError::Lex {
            line: 2,
            source: LexError::MalformedNumber("1.2.3".into()),
        }
    );
}

#[test]
fn overflowing_arrow_size_never_reaches_factory() {
    let source = format!("\"a\" arrow (arrowsize={});", "9".repeat(400));
    let err = parse_err(&source);
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert!(err.to_string().contains("too large"), "{err}");
}
