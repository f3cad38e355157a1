use std::fmt::{self, Write};

use crate::value::{Field, TypeName, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Display,
    Debug,
}

/// Renders `value` the way it is printed to the console and the log file.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String only fails if a `Streamable` reports an error;
    // whatever it wrote up to that point is kept.
    let _ = write_value(&mut out, value, Mode::Display);
    out
}

/// Debug form: text is quoted and type names are fully qualified.
pub fn render_debug(value: &Value) -> String {
    let mut out = String::new();
    let _ = write_value(&mut out, value, Mode::Debug);
    out
}

fn write_value(out: &mut dyn Write, value: &Value, mode: Mode) -> fmt::Result {
    match value {
        Value::Nil | Value::Optional(None) => out.write_str("nil"),
        Value::Text(text) => match mode {
            Mode::Display => out.write_str(text),
            Mode::Debug => write!(out, "{:?}", text),
        },
        Value::Scalar(scalar) => out.write_str(scalar),
        Value::Stream(stream) => stream.write_to(out),
        Value::Custom {
            description,
            debug_description,
        } => {
            let preferred = match mode {
                Mode::Display => description.as_ref().or(debug_description.as_ref()),
                Mode::Debug => debug_description.as_ref().or(description.as_ref()),
            };
            match preferred {
                Some(text) => out.write_str(text),
                None => out.write_str("nil"),
            }
        }
        Value::Optional(Some(inner)) => write_value(out, inner, Mode::Debug),
        Value::Tuple(fields) => write_tuple(out, fields),
        Value::Record { type_name, fields } => {
            write_type_name(out, type_name, mode)?;
            out.write_char('(')?;
            let labeled = fields
                .iter()
                .filter_map(|f| f.label.as_deref().map(|label| (label, &f.value)));
            for (i, (label, value)) in labeled.enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "{}: ", label)?;
                write_value(out, value, Mode::Debug)?;
            }
            out.write_char(')')
        }
        Value::Variant {
            type_name,
            tag,
            payload,
        } => {
            match tag {
                Some(tag) => {
                    if mode == Mode::Debug {
                        write!(out, "{}::", type_name.qualified())?;
                    }
                    out.write_str(tag)?;
                }
                None => write_type_name(out, type_name, mode)?,
            }

            match payload.as_deref() {
                Some(payload) if payload.is_tuple() => write_value(out, payload, Mode::Debug),
                Some(payload) => {
                    out.write_char('(')?;
                    write_value(out, payload, Mode::Debug)?;
                    out.write_char(')')
                }
                None => Ok(()),
            }
        }
        Value::Type(type_name) => write_type_name(out, type_name, mode),
        Value::Opaque { type_name, summary } => match summary {
            Some(summary) => out.write_str(summary),
            None => out.write_str(type_name.qualified()),
        },
    }
}

fn write_tuple(out: &mut dyn Write, fields: &[Field]) -> fmt::Result {
    out.write_char('(')?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        if let Some(label) = field.label.as_deref() {
            // Positional labels such as `.0` carry no information.
            if !label.is_empty() && !label.starts_with('.') {
                write!(out, "{}: ", label)?;
            }
        }
        write_value(out, &field.value, Mode::Debug)?;
    }
    out.write_char(')')
}

fn write_type_name(out: &mut dyn Write, type_name: &TypeName, mode: Mode) -> fmt::Result {
    match mode {
        Mode::Display => out.write_str(&type_name.short()),
        Mode::Debug => out.write_str(type_name.qualified()),
    }
}
