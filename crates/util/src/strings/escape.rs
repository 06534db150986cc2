/// Returns the escape sequence for `b`, or `None` when it is emitted as is.
///
/// Only ASCII bytes are ever escaped, so scanning bytes instead of chars is
/// safe for UTF-8 input: continuation bytes are always >= 0x80.
fn escape_byte(b: u8) -> Option<&'static str> {
    let escaped = match b {
        0x00 => "\\u0000",
        0x01 => "\\u0001",
        0x02 => "\\u0002",
        0x03 => "\\u0003",
        0x04 => "\\u0004",
        0x05 => "\\u0005",
        0x06 => "\\u0006",
        0x07 => "\\u0007",
        0x08 => "\\b",
        b'\t' => "\\t",
        b'\n' => "\\n",
        0x0b => "\\u000b",
        0x0c => "\\f",
        b'\r' => "\\r",
        0x0e => "\\u000e",
        0x0f => "\\u000f",
        0x10 => "\\u0010",
        0x11 => "\\u0011",
        0x12 => "\\u0012",
        0x13 => "\\u0013",
        0x14 => "\\u0014",
        0x15 => "\\u0015",
        0x16 => "\\u0016",
        0x17 => "\\u0017",
        0x18 => "\\u0018",
        0x19 => "\\u0019",
        0x1a => "\\u001a",
        0x1b => "\\u001b",
        0x1c => "\\u001c",
        0x1d => "\\u001d",
        0x1e => "\\u001e",
        0x1f => "\\u001f",
        b'"' => "\\\"",
        b'\\' => "\\\\",
        _ => return None,
    };
    Some(escaped)
}

/// Write `s` as a double-quoted JSON string literal, one chunk at a time.
///
/// Escaping matches `JSON.stringify`: quote and backslash, the short forms
/// `\b \f \n \r \t`, and lowercase `\u00XX` for the remaining C0 controls.
/// Everything else, including non-ASCII text, is passed through unchanged.
///
/// # Examples
///
/// ```
/// use json_canon_util::strings::quote_into;
///
/// let mut out = String::new();
/// quote_into("a\"b", |chunk| out.push_str(chunk));
/// assert_eq!(out, "\"a\\\"b\"");
/// ```
pub fn quote_into<F>(s: &str, mut emit: F)
where
    F: FnMut(&str),
{
    emit("\"");
    let mut last = 0;
    for (i, &b) in s.as_bytes().iter().enumerate() {
        let Some(esc) = escape_byte(b) else {
            continue;
        };
        // `i` is an ASCII position, hence a char boundary.
        if last < i {
            emit(&s[last..i]);
        }
        emit(esc);
        last = i + 1;
    }
    if last < s.len() {
        emit(&s[last..]);
    }
    emit("\"");
}

/// Quote `s` into an owned `String`.
///
/// # Examples
///
/// ```
/// use json_canon_util::strings::quote;
///
/// assert_eq!(quote("hello"), "\"hello\"");
/// assert_eq!(quote("line1\nline2"), "\"line1\\nline2\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    quote_into(s, |chunk| out.push_str(chunk));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_simple() {
        assert_eq!(quote("hello"), r#""hello""#);
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote(""), r#""""#);
    }

    #[test]
    fn test_quote_quotes_and_backslash() {
        assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quote("back\\slash"), r#""back\\slash""#);
    }

    #[test]
    fn test_quote_short_escapes() {
        assert_eq!(quote("a\nb\rc\td"), r#""a\nb\rc\td""#);
        assert_eq!(quote("back\x08space"), r#""back\bspace""#);
        assert_eq!(quote("form\x0cfeed"), r#""form\ffeed""#);
    }

    #[test]
    fn test_quote_control_chars_lowercase_hex() {
        assert_eq!(quote("null\0byte"), r#""null\u0000byte""#);
        assert_eq!(quote("\x1f"), r#""\u001f""#);
        assert_eq!(quote("\x0b"), r#""\u000b""#);
    }

    #[test]
    fn test_quote_leaves_unicode_and_del_alone() {
        assert_eq!(quote("hello 日本語"), "\"hello 日本語\"");
        assert_eq!(quote("\u{7f}"), "\"\u{7f}\"");
        assert_eq!(quote("\u{2028}"), "\"\u{2028}\"");
    }

    #[test]
    fn test_quote_matches_serde_json_for_printable_text() {
        for s in ["plain", "with \"quotes\"", "tab\tand\nnewline", "ünïcödé"] {
            assert_eq!(quote(s), serde_json::to_string(s).unwrap());
        }
    }

    #[test]
    fn test_quote_into_emits_in_chunks() {
        let mut chunks = Vec::new();
        quote_into("ab\ncd", |chunk| chunks.push(chunk.to_owned()));
        assert_eq!(chunks, vec!["\"", "ab", "\\n", "cd", "\""]);
    }
}
