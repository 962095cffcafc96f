//! # Text Rendering
//!
//! Three renderings of an argument buffer, all built on the string coercion
//! of `Value`:
//!
//! | Method | Output for `id=42, name="bob"` |
//! |--------|-------------------------------|
//! | `print` | `42, bob` |
//! | `print_json` | `42, "bob"` |
//! | `print_format("{name}#{id}")` | `bob#42` |

use std::fmt::Write;

use super::arguments::Arguments;
use crate::config::PRINT_SEPARATOR;
use crate::types::{Value, VariantView};

impl Arguments {
    /// Values joined by `", "`, names omitted.
    pub fn print(&self) -> String {
        let mut out = String::new();
        for (i, arg) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(PRINT_SEPARATOR);
            }
            out.push_str(&arg.value().get_string());
        }
        out
    }

    /// Like `print`, with each value rendered as a JSON literal: numbers and
    /// booleans bare, `Unknown`/`Void` and non-finite floats as `null`,
    /// everything else as an escaped string.
    pub fn print_json(&self) -> String {
        let mut out = String::new();
        for (i, arg) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(PRINT_SEPARATOR);
            }
            write_json_literal(&arg.value(), &mut out);
        }
        out
    }

    /// Replaces each `{name}` in `template` with the stringified value of the
    /// first record of that name. Unknown names stay verbatim; `{{` and `}}`
    /// produce literal braces.
    pub fn print_format(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(i) = rest.find(['{', '}']) {
            out.push_str(&rest[..i]);
            let tail = &rest[i..];
            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
                continue;
            }
            if tail.starts_with('}') {
                out.push('}');
                rest = &tail[1..];
                continue;
            }
            match tail[1..].find(['{', '}']) {
                Some(close) if tail.as_bytes()[1 + close] == b'}' => {
                    let name = &tail[1..1 + close];
                    match self.get(name) {
                        Some(value) => out.push_str(&value.get_string()),
                        None => out.push_str(&tail[..close + 2]),
                    }
                    rest = &tail[close + 2..];
                }
                _ => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn write_json_literal(value: &VariantView<'_>, out: &mut String) {
    match value {
        Value::Unknown | Value::Void => out.push_str("null"),
        Value::Float(v) if !v.is_finite() => out.push_str("null"),
        Value::Double(v) if !v.is_finite() => out.push_str("null"),
        Value::Bool(_)
        | Value::Bit(_)
        | Value::Int8(_)
        | Value::Int16(_)
        | Value::Int32(_)
        | Value::Int64(_)
        | Value::UInt8(_)
        | Value::UInt16(_)
        | Value::UInt32(_)
        | Value::UInt64(_)
        | Value::Float(_)
        | Value::Double(_) => out.push_str(&value.get_string()),
        _ => {
            out.push('"');
            write_escaped(&value.get_string(), out);
            out.push('"');
        }
    }
}

fn write_escaped(src: &str, out: &mut String) {
    for c in src.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}
