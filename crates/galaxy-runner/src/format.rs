//! Declarative argument formatting
//!
//! Every logical parameter of a wrapped command is described by an
//! [`ArgFormat`] rule. The rule turns the parameter's [`ArgValue`] into zero or
//! more command-line tokens:
//!
//! - [`ArgFormat::flag`] - a fixed token when the value is true
//! - [`ArgFormat::fixed`] - constant tokens, the value is ignored
//! - [`ArgFormat::opt_val`] - a flag token followed by the value
//! - [`ArgFormat::list`] - the value (or each element) as positional tokens
//! - [`ArgFormat::func`] - a custom pure transform

use std::collections::BTreeMap;
use std::fmt;

/// Value of a logical command parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArgValue {
    /// Parameter is known but unset
    #[default]
    None,
    /// Boolean switch
    Bool(bool),
    /// Single string value
    Str(String),
    /// Multiple string values
    List(Vec<String>),
}

impl ArgValue {
    /// Whether the value is `Bool(true)`; flag rules emit nothing otherwise
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// The value as a string slice, if it holds a single string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    fn positional(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Bool(b) => vec![b.to_string()],
            Self::Str(s) if s.is_empty() => Vec::new(),
            Self::Str(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::None)
    }
}

/// Custom transform from a parameter value to tokens
pub type FormatFn = fn(&ArgValue) -> Vec<String>;

/// Formatting rule for one logical parameter
#[derive(Clone)]
pub enum ArgFormat {
    /// Emit the token when the value is true
    Flag(String),
    /// Always emit these tokens
    Fixed(Vec<String>),
    /// Emit `flag value`, nothing when the value is unset or empty
    OptVal(String),
    /// Emit the value(s) as positional tokens
    List,
    /// Apply a custom transform
    Func(FormatFn),
}

impl ArgFormat {
    /// Boolean flag rule
    pub fn flag(on: impl Into<String>) -> Self {
        Self::Flag(on.into())
    }

    /// Fixed literal rule
    pub fn fixed(token: impl Into<String>) -> Self {
        Self::Fixed(vec![token.into()])
    }

    /// Option-with-value rule
    pub fn opt_val(flag: impl Into<String>) -> Self {
        Self::OptVal(flag.into())
    }

    /// Bare value / list rule
    pub fn list() -> Self {
        Self::List
    }

    /// Custom transform rule
    pub fn func(f: FormatFn) -> Self {
        Self::Func(f)
    }

    /// Fixed rules need no value from the caller
    pub fn ignores_missing_value(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Produce the tokens for a value
    pub fn format(&self, value: &ArgValue) -> Vec<String> {
        match self {
            Self::Flag(on) if value.is_true() => vec![on.clone()],
            Self::Flag(_) => Vec::new(),
            Self::Fixed(tokens) => tokens.clone(),
            Self::OptVal(flag) => value
                .positional()
                .into_iter()
                .flat_map(|v| [flag.clone(), v])
                .collect(),
            Self::List => value.positional(),
            Self::Func(f) => f(value),
        }
    }
}

impl fmt::Debug for ArgFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(on) => f.debug_tuple("Flag").field(on).finish(),
            Self::Fixed(tokens) => f.debug_tuple("Fixed").field(tokens).finish(),
            Self::OptVal(flag) => f.debug_tuple("OptVal").field(flag).finish(),
            Self::List => f.write_str("List"),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Format table keyed by parameter name
#[derive(Debug, Clone, Default)]
pub struct ArgFormats {
    formats: BTreeMap<String, ArgFormat>,
}

impl ArgFormats {
    /// Create an empty format table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a parameter
    pub fn with(mut self, name: impl Into<String>, format: ArgFormat) -> Self {
        self.formats.insert(name.into(), format);
        self
    }

    /// Look up the rule for a parameter
    pub fn get(&self, name: &str) -> Option<&ArgFormat> {
        self.formats.get(name)
    }

    /// Whether a rule exists for a parameter
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }
}

/// Named parameter values for one invocation
///
/// Keys are kept sorted, so the argument vector depends only on the values
/// and the template, never on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSet {
    values: BTreeMap<String, ArgValue>,
}

impl ArgSet {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a value
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for ArgSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
