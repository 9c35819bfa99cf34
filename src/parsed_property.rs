use std::{fmt::Display, ops::Deref};

/// A configuration value together with where it came from.
///
/// Sources are recorded by name only: the raw text of a value is never kept,
/// so a property holding a token can be logged by source without exposing it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedProperty<T> {
    /// Value from a command line argument (parsed_value, argument name)
    Cli(T, &'static str),
    /// Value from an environment variable or `.env` entry (parsed_value, variable name)
    Env(T, &'static str),
    /// Default value when no other source provided
    Default(T),
}

impl<T> ParsedProperty<T> {
    /// Get the parsed value
    pub fn value(&self) -> &T {
        match self {
            ParsedProperty::Cli(value, _) => value,
            ParsedProperty::Env(value, _) => value,
            ParsedProperty::Default(value) => value,
        }
    }

    /// Consume the property and return the parsed value
    pub fn into_value(self) -> T {
        match self {
            ParsedProperty::Cli(value, _) => value,
            ParsedProperty::Env(value, _) => value,
            ParsedProperty::Default(value) => value,
        }
    }

    /// Get the source name as a string
    pub fn source_name(&self) -> &'static str {
        match self {
            ParsedProperty::Cli(_, _) => "cli",
            ParsedProperty::Env(_, _) => "env",
            ParsedProperty::Default(_) => "default",
        }
    }

    /// Argument or variable name the value was read from
    pub fn origin(&self) -> Option<&'static str> {
        match self {
            ParsedProperty::Cli(_, name) => Some(*name),
            ParsedProperty::Env(_, name) => Some(*name),
            ParsedProperty::Default(_) => None,
        }
    }

    /// Check if this property came from a specific source
    pub fn is_from_source(&self, source: &str) -> bool {
        self.source_name() == source
    }
}

impl<T> Deref for ParsedProperty<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<T: Display> Display for ParsedProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value().fmt(f)
    }
}

impl<T> From<T> for ParsedProperty<T> {
    fn from(value: T) -> Self {
        ParsedProperty::Default(value)
    }
}
