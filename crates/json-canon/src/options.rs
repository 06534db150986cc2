//! Caller configuration: indentation, property replacer and key sorter.
//!
//! Callbacks get their context as explicit arguments. A replacer sees the
//! enclosing object, the property, its nesting level and its full key path.
//! A sorter sees the object being sorted, its level and its own key path.

use std::cmp::Ordering;
use std::fmt;

use crate::indent::Indent;
use crate::value::{Object, Value};

/// One object property, as presented to a replacer.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    /// The object the property belongs to, for sibling lookups.
    pub object: &'a Object,
    pub key: &'a str,
    /// `None` when the property is bound to the absent marker.
    pub value: Option<&'a Value>,
    /// Nesting level of the property; the root object's properties are at 1.
    pub level: usize,
    /// Path to the property, e.g. `.node2.objects[0].key`.
    pub key_path: &'a str,
}

/// The object whose keys are being sorted.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub object: &'a Object,
    /// Same level its properties are reported at.
    pub level: usize,
    /// Path to the object itself (empty for the root).
    pub key_path: &'a str,
}

/// What a replacer wants done with a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Emit the original value. An absent original stays absent.
    Keep,
    /// Drop the property.
    Omit,
    /// Emit this value instead.
    With(Value),
}

impl From<Option<Value>> for Replacement {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => Replacement::With(v),
            None => Replacement::Omit,
        }
    }
}

pub type Replacer<'a> = Box<dyn Fn(&Property<'_>) -> Replacement + 'a>;
pub type Sorter<'a> = Box<dyn Fn(&str, &str, &Scope<'_>) -> Ordering + 'a>;

/// Byte-lexicographic ascending order, the default.
pub fn default_sorter(a: &str, b: &str, _scope: &Scope<'_>) -> Ordering {
    a.cmp(b)
}

/// Options for [`canonicalize`](crate::canonicalize) and
/// [`digest`](crate::digest).
///
/// # Example
///
/// ```
/// use json_canon::{canonicalize_to_string, CanonicalOptions, Indent, Object, Replacement, Value};
///
/// let value = Value::from(Object::new().with("b", 1).with("a", 2).with("secret", "x"));
/// let options = CanonicalOptions::new()
///     .indent(Indent::Compact)
///     .replacer(|prop| if prop.key == "secret" { Replacement::Omit } else { Replacement::Keep })
///     .sorter(|a, b, _| b.cmp(a));
/// assert_eq!(canonicalize_to_string(&value, &options).unwrap(), r#"{"b":1,"a":2}"#);
/// ```
#[derive(Default)]
pub struct CanonicalOptions<'a> {
    pub(crate) indent: Indent,
    pub(crate) replacer: Option<Replacer<'a>>,
    pub(crate) sorter: Option<Sorter<'a>>,
}

impl<'a> CanonicalOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: impl Into<Indent>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn replacer<F>(mut self, replacer: F) -> Self
    where
        F: Fn(&Property<'_>) -> Replacement + 'a,
    {
        self.replacer = Some(Box::new(replacer));
        self
    }

    pub fn sorter<F>(mut self, sorter: F) -> Self
    where
        F: Fn(&str, &str, &Scope<'_>) -> Ordering + 'a,
    {
        self.sorter = Some(Box::new(sorter));
        self
    }

    pub fn get_indent(&self) -> &Indent {
        &self.indent
    }

    pub fn has_replacer(&self) -> bool {
        self.replacer.is_some()
    }

    pub fn has_sorter(&self) -> bool {
        self.sorter.is_some()
    }

    pub(crate) fn replace(&self, prop: &Property<'_>) -> Replacement {
        match &self.replacer {
            Some(replacer) => replacer(prop),
            None => Replacement::Keep,
        }
    }

    pub(crate) fn compare(&self, a: &str, b: &str, scope: &Scope<'_>) -> Ordering {
        match &self.sorter {
            Some(sorter) => sorter(a, b, scope),
            None => default_sorter(a, b, scope),
        }
    }
}

impl fmt::Debug for CanonicalOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalOptions")
            .field("indent", &self.indent)
            .field("replacer", &self.replacer.as_ref().map(|_| "<fn>"))
            .field("sorter", &self.sorter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CanonicalOptions::default();
        assert_eq!(options.get_indent(), &Indent::Compact);
        assert!(!options.has_replacer());
        assert!(!options.has_sorter());
    }

    #[test]
    fn default_sorter_is_bytewise() {
        let obj = Object::new();
        let scope = Scope {
            object: &obj,
            level: 1,
            key_path: "",
        };
        assert_eq!(default_sorter("B", "a", &scope), Ordering::Less);
        assert_eq!(default_sorter("int", "intArray", &scope), Ordering::Less);
        assert_eq!(default_sorter("é", "z", &scope), Ordering::Greater);
    }

    #[test]
    fn replacement_from_option() {
        assert_eq!(Replacement::from(None), Replacement::Omit);
        assert_eq!(
            Replacement::from(Some(Value::Null)),
            Replacement::With(Value::Null)
        );
    }

    #[test]
    fn debug_hides_closures() {
        let options = CanonicalOptions::new().indent(Indent::spaces(2)).sorter(|a, b, _| b.cmp(a));
        let text = format!("{options:?}");
        assert!(text.contains("Spaces(2)"));
        assert!(text.contains("<fn>"));
    }
}
