//! Parameter metadata for CLI help and operation listings
//!
//! This metadata is derived from struct fields, not duplicated.

use std::fmt;

/// Parameter type for schema generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a parameter - derived from struct fields
#[derive(Debug, Clone)]
pub struct ParamMeta {
    /// Field name
    pub name: &'static str,
    /// Description (from doc comment)
    pub description: &'static str,
    /// Parameter type
    pub param_type: ParamType,
    /// Whether required (non-Option field)
    pub required: bool,
}

impl ParamMeta {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            param_type: ParamType::String,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    pub const fn param_type(mut self, t: ParamType) -> Self {
        self.param_type = t;
        self
    }

    /// One-line usage fragment, e.g. `<title: string>` or `[description: string]`
    pub fn usage(&self) -> String {
        if self.required {
            format!("<{}: {}>", self.name, self.param_type)
        } else {
            format!("[{}: {}]", self.name, self.param_type)
        }
    }
}
