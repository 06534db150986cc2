//! The canonicalizer: renders a [`Value`] into its canonical text.
//!
//! Output is produced depth-first straight into a [`Sink`]. The sink is
//! either a byte buffer or a running hash, so the digest adapter never has to
//! hold the whole text in memory. An error anywhere aborts the walk; callers
//! throw the sink away and never see partial output.
//!
//! Layout, for an indent unit `u` (empty when compact) at nesting level `L`:
//!
//! ```text
//! [ LB u*L elem , LB u*L elem LB u*(L-1) ]
//! { LB u*L "key": SP value , ... LB u*(L-1) }
//! ```
//!
//! where `LB` is a newline and `SP` a space, both only when `u` is non-empty.
//! Empty arrays and objects with no surviving properties are `[]` and `{}`.

use std::borrow::Cow;

use json_canon_util::{insertion_sort_by, quote_into, write_number};

use crate::date::to_iso_string;
use crate::error::{Error, Result};
use crate::options::{CanonicalOptions, Property, Replacement, Scope};
use crate::value::{Object, Value};

/// Destination for canonical text.
pub trait Sink {
    fn write_str(&mut self, s: &str);
}

impl Sink for Vec<u8> {
    fn write_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }
}

impl Sink for String {
    fn write_str(&mut self, s: &str) {
        self.push_str(s);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_str(&mut self, s: &str) {
        (**self).write_str(s);
    }
}

/// Canonical bytes of `value`.
///
/// # Example
///
/// ```
/// use json_canon::{canonicalize, CanonicalOptions, Object, Value};
///
/// let a = Value::from(Object::new().with("b", 1).with("a", vec![true, false]));
/// let bytes = canonicalize(&a, &CanonicalOptions::default()).unwrap();
/// assert_eq!(bytes, br#"{"a":[true,false],"b":1}"#);
/// ```
pub fn canonicalize(value: &Value, options: &CanonicalOptions<'_>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    canonicalize_into(value, options, &mut out)?;
    tracing::trace!(bytes = out.len(), "canonicalized value");
    Ok(out)
}

/// Canonical text of `value`. The output is always valid UTF-8.
pub fn canonicalize_to_string(value: &Value, options: &CanonicalOptions<'_>) -> Result<String> {
    let mut out = String::new();
    canonicalize_into(value, options, &mut out)?;
    tracing::trace!(bytes = out.len(), "canonicalized value");
    Ok(out)
}

/// Canonical bytes of a parsed `serde_json` document.
pub fn canonicalize_json(
    value: &serde_json::Value,
    options: &CanonicalOptions<'_>,
) -> Result<Vec<u8>> {
    canonicalize(&Value::from(value), options)
}

/// Stream the canonical text of `value` into `sink`.
///
/// On error the sink may hold a prefix of the output and must be discarded.
pub fn canonicalize_into<S: Sink>(
    value: &Value,
    options: &CanonicalOptions<'_>,
    sink: S,
) -> Result<()> {
    let mut canonicalizer = Canonicalizer::new(options, sink);
    canonicalizer.write_any(value, 1).inspect_err(|err| {
        tracing::debug!(error = %err, "canonicalization failed");
    })
}

struct Canonicalizer<'o, 'a, S> {
    options: &'o CanonicalOptions<'a>,
    sink: S,
    /// Indent unit; empty for compact output.
    unit: Cow<'o, str>,
    /// Key path of the node being written. Segments are pushed on descent
    /// and truncated on the way back up.
    path: String,
    /// Scratch buffer for number rendering.
    num: String,
}

impl<'o, 'a, S: Sink> Canonicalizer<'o, 'a, S> {
    fn new(options: &'o CanonicalOptions<'a>, sink: S) -> Self {
        Self {
            options,
            sink,
            unit: options.indent.unit(),
            path: String::new(),
            num: String::new(),
        }
    }

    fn write_any(&mut self, value: &Value, level: usize) -> Result<()> {
        match value {
            Value::Null => self.sink.write_str("null"),
            Value::Bool(true) => self.sink.write_str("true"),
            Value::Bool(false) => self.sink.write_str("false"),
            Value::Number(n) => self.write_number(*n)?,
            Value::String(s) => self.write_str(s),
            Value::Date(d) => self.write_str(&to_iso_string(d)),
            Value::Array(arr) => self.write_arr(arr, level)?,
            Value::Object(obj) => self.write_obj(obj, level)?,
        }
        Ok(())
    }

    fn write_number(&mut self, n: f64) -> Result<()> {
        self.num.clear();
        if write_number(&mut self.num, n).is_none() {
            let kind = if n.is_nan() {
                "NaN"
            } else if n > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            };
            return Err(Error::UnsupportedValueType {
                kind,
                key_path: self.path.clone(),
            });
        }
        self.sink.write_str(&self.num);
        Ok(())
    }

    fn write_str(&mut self, s: &str) {
        let sink = &mut self.sink;
        quote_into(s, |chunk| sink.write_str(chunk));
    }

    fn line_break(&mut self) {
        if !self.unit.is_empty() {
            self.sink.write_str("\n");
        }
    }

    fn indentation(&mut self, depth: usize) {
        for _ in 0..depth {
            self.sink.write_str(&self.unit);
        }
    }

    fn write_arr(&mut self, arr: &[Value], level: usize) -> Result<()> {
        if arr.is_empty() {
            self.sink.write_str("[]");
            return Ok(());
        }
        self.sink.write_str("[");
        let base = self.path.len();
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.sink.write_str(",");
            }
            self.line_break();
            self.indentation(level);
            self.path.push('[');
            self.path.push_str(&i.to_string());
            self.path.push(']');
            let res = self.write_any(item, level + 1);
            self.path.truncate(base);
            res?;
        }
        self.line_break();
        self.indentation(level - 1);
        self.sink.write_str("]");
        Ok(())
    }

    fn write_obj(&mut self, obj: &Object, level: usize) -> Result<()> {
        let mut keys: Vec<&str> = obj.keys().collect();
        {
            let scope = Scope {
                object: obj,
                level,
                key_path: &self.path,
            };
            let options = self.options;
            insertion_sort_by(&mut keys, |a, b| options.compare(a, b, &scope));
        }

        let base = self.path.len();
        let mut written = 0usize;
        for key in keys {
            let original = obj.entry(key).flatten();
            self.path.push('.');
            self.path.push_str(key);

            let replacement = self.options.replace(&Property {
                object: obj,
                key,
                value: original,
                level,
                key_path: &self.path,
            });
            let value = match replacement {
                Replacement::Omit => None,
                Replacement::Keep => original.map(Cow::Borrowed),
                Replacement::With(value) => Some(Cow::Owned(value)),
            };
            let res = match &value {
                Some(value) => self.write_prop(key, value, level, written == 0).map(|()| 1),
                None => Ok(0),
            };
            self.path.truncate(base);
            written += res?;
        }

        if written == 0 {
            self.sink.write_str("{}");
            return Ok(());
        }
        self.line_break();
        self.indentation(level - 1);
        self.sink.write_str("}");
        Ok(())
    }

    fn write_prop(&mut self, key: &str, value: &Value, level: usize, first: bool) -> Result<()> {
        self.sink.write_str(if first { "{" } else { "," });
        self.line_break();
        self.indentation(level);
        self.write_str(key);
        self.sink.write_str(":");
        if !self.unit.is_empty() {
            self.sink.write_str(" ");
        }
        self.write_any(value, level + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(value: &Value, options: &CanonicalOptions<'_>) -> (Result<()>, String, String) {
        let mut out = String::new();
        let mut canonicalizer = Canonicalizer::new(options, &mut out);
        let res = canonicalizer.write_any(value, 1);
        let path = canonicalizer.path.clone();
        (res, path, out)
    }

    #[test]
    fn nested_layout_with_two_spaces() {
        let value = Value::from(
            Object::new()
                .with("a", vec![Value::from(1), Value::from(Object::new().with("b", true))])
                .with("c", Vec::<Value>::new()),
        );
        let options = CanonicalOptions::new().indent(crate::Indent::spaces(2));
        let (res, _, out) = write(&value, &options);
        res.unwrap();
        assert_eq!(
            out,
            "{\n  \"a\": [\n    1,\n    {\n      \"b\": true\n    }\n  ],\n  \"c\": []\n}"
        );
    }

    #[test]
    fn nested_array_layout_when_compact() {
        let value = Value::from(vec![
            Value::from(vec![1, 2]),
            Value::from(Vec::<Value>::new()),
            Value::Null,
        ]);
        let (res, _, out) = write(&value, &CanonicalOptions::default());
        res.unwrap();
        assert_eq!(out, "[[1,2],[],null]");
    }

    #[test]
    fn path_is_unwound_after_success() {
        let value = Value::from(Object::new().with("a", Object::new().with("b", vec![1, 2])));
        let (res, path, _) = write(&value, &CanonicalOptions::default());
        res.unwrap();
        assert_eq!(path, "");
    }

    #[test]
    fn path_is_unwound_after_an_error() {
        let value = Value::from(
            Object::new().with("a", Object::new().with("b", vec![1.0, f64::NAN])),
        );
        let (res, path, _) = write(&value, &CanonicalOptions::default());
        assert_eq!(
            res,
            Err(Error::UnsupportedValueType {
                kind: "NaN",
                key_path: ".a.b[1]".into(),
            })
        );
        assert_eq!(path, "");
    }

    #[test]
    fn scratch_buffer_is_reset_between_numbers() {
        let value = Value::from(vec![123.5, 7.0, -0.25]);
        let (res, _, out) = write(&value, &CanonicalOptions::default());
        res.unwrap();
        assert_eq!(out, "[123.5,7,-0.25]");
    }

    #[test]
    fn string_sink_matches_byte_sink() {
        let value = Value::from(Object::new().with("k\u{7}", "v\"q"));
        let options = CanonicalOptions::default();
        let bytes = canonicalize(&value, &options).unwrap();
        let text = canonicalize_to_string(&value, &options).unwrap();
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(text, "{\"k\\u0007\":\"v\\\"q\"}");
    }
}
