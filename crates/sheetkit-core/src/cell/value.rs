//! What a cell can hold

use chrono::NaiveDateTime;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Contents of one cell
///
/// Dates live here as calendar values. On disk they are serial numbers
/// tagged with a date number format, and the codecs convert at the edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    String(SharedString),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn string<S: Into<String>>(text: S) -> Self {
        Self::String(SharedString::from(text.into()))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::Empty
    }

    /// True for no value and for a zero-length string
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::String(text) => text.is_empty(),
            Self::Boolean(_) | Self::Number(_) | Self::DateTime(_) => false,
        }
    }

    /// Numeric reading; booleans count as 1 and 0
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            Self::Boolean(flag) => Some(if flag { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(text) = self {
            Some(text.as_str())
        } else {
            None
        }
    }

    /// Kind reported for a column: `boolean`, `number`, `string`, `date` or `empty`
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::DateTime(_) => "date",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::String(text) => f.write_str(text),
            Self::DateTime(at) => fmt::Display::fmt(&at.format("%Y-%m-%d %H:%M:%S"), f),
        }
    }
}

macro_rules! number_from {
    ($($source:ty),*) => {
        $(impl From<$source> for CellValue {
            fn from(n: $source) -> Self {
                Self::Number(f64::from(n))
            }
        })*
    };
}

number_from!(i32, u32, f64);

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::String(text.into())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::String(text.into())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(at: NaiveDateTime) -> Self {
        Self::DateTime(at)
    }
}

/// Immutable text that cells parsed from one string table can share
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for SharedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl From<&str> for SharedString {
    fn from(text: &str) -> Self {
        Self(Arc::from(text))
    }
}

impl From<String> for SharedString {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}
