//! Apex class emission from a `TypeTree`.
//!
//! Layout is fixed: the root class at column 0 with its fields one indent in,
//! then every other record as a nested class (sorted by name) one indent in
//! with fields two indents in. Fields are always sorted by name so output
//! diffs stay stable.
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::ir::{Primitive, RecordType, Ty, TypeTree};

pub const NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

pub const DEFAULT_INDENT_WIDTH: usize = 3;

/// Apex identifiers: a letter first, no doubled or trailing underscore.
static APEX_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z](?:_?[A-Za-z0-9])*$").expect("identifier pattern is valid")
});

pub fn is_apex_identifier(s: &str) -> bool {
    APEX_IDENT.is_match(s)
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub indent_width: usize,
    /// add `public static <Root> parse(String json)` to the root class
    pub parse_method: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self { indent_width: DEFAULT_INDENT_WIDTH, parse_method: false }
    }
}

#[derive(Debug)]
pub struct Codegen {
    out: String,
    style: Style,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

pub fn primitive_keyword(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "String",
        Primitive::Integer => "Integer",
        Primitive::Long => "Long",
        Primitive::Double => "Double",
        Primitive::Boolean => "Boolean",
        Primitive::DateTime => "Datetime",
    }
}

pub fn type_name(ty: &Ty) -> String {
    match ty {
        Ty::Primitive(p) => primitive_keyword(*p).to_string(),
        Ty::List(item) => format!("List<{}>", type_name(item)),
        Ty::Reference(name) => name.clone(),
    }
}

/// Escape text for use inside a single-quoted Apex string literal.
pub fn apex_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out
}

impl Codegen {
    pub fn new(style: Style) -> Self {
        Self { out: String::new(), style }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(self.style.indent_width * depth)
    }

    fn line(&mut self, depth: usize, text: impl Display) {
        let indent = self.indent(depth);
        self.out.push_str(&indent);
        self.out.push_str(&text.to_string());
        self.out.push_str(NEWLINE);
    }

    fn open_class(&mut self, depth: usize, name: &str) {
        self.line(depth, format_args!("public class {name} {{"));
    }

    fn close(&mut self, depth: usize) {
        self.line(depth, "}");
    }

    fn fields(&mut self, depth: usize, record: &RecordType) {
        for (name, ty) in &record.fields {
            if !is_apex_identifier(name) {
                tracing::warn!(record = %record.name, field = %name, "field name is not a valid Apex identifier");
            }
            self.line(depth, format_args!("public {} {};", type_name(ty), name));
        }
    }

    fn parse_method(&mut self, depth: usize, root: &str) {
        self.line(depth, format_args!("public static {root} parse(String json) {{"));
        self.line(depth + 1, format_args!("return ({root}) System.JSON.deserialize(json, {root}.class);"));
        self.close(depth);
    }

    /// Render the whole tree as one root class with nested classes.
    pub fn emit(&mut self, tree: &TypeTree) {
        let root = tree.root();
        self.open_class(0, &root.name);
        self.fields(1, root);
        for record in tree.nested_sorted() {
            self.open_class(1, &record.name);
            self.fields(2, record);
            self.close(1);
        }
        if self.style.parse_method {
            self.parse_method(1, &root.name);
        }
        self.close(0);
    }

    /// Render the smoke-test class `Test<root>` that deserializes `document`
    /// and asserts the result is not null.
    pub fn emit_test(&mut self, root: &str, document: &Value) -> Result<()> {
        let payload = pretty_json(document, self.style.indent_width)?;
        let payload: Vec<&str> = payload.lines().collect();

        self.line(0, "@IsTest");
        self.line(0, format_args!("public class Test{root} {{"));
        self.line(1, "@IsTest");
        self.line(1, "static void testParse() {");
        for (i, chunk) in payload.iter().enumerate() {
            let literal = format!("'{}'", apex_string_escape(chunk));
            let tail = if i + 1 == payload.len() { ";" } else { " +" };
            if i == 0 {
                self.line(2, format_args!("String json = {literal}{tail}"));
            } else {
                self.line(3, format_args!("{literal}{tail}"));
            }
        }
        self.line(2, format_args!("{root} obj = ({root}) System.JSON.deserialize(json, {root}.class);"));
        self.line(2, "System.assert(obj != null);");
        self.close(1);
        self.close(0);
        Ok(())
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

fn pretty_json(document: &Value, indent_width: usize) -> Result<String> {
    let indent = " ".repeat(indent_width);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Class declarations for `tree`.
pub fn emit(tree: &TypeTree, style: Style) -> String {
    let mut cg = Codegen::new(style);
    cg.emit(tree);
    cg.into_string()
}

/// Smoke-test class for the root class `root`, embedding `document`.
pub fn emit_test(root: &str, document: &Value, indent_width: usize) -> Result<String> {
    let mut cg = Codegen::new(Style { indent_width, ..Style::default() });
    cg.emit_test(root, document)?;
    Ok(cg.into_string())
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
