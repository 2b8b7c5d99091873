use crate::error::{ConfigError, ParseResult};
use crate::list::SettingList;
use std::fmt;

/// Type tag carried by every setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SettingType {
    /// Not yet assigned; becomes permanent on the first successful set
    #[default]
    None,

    /// Container of named settings
    Group,

    /// 64-bit signed integer
    Int,

    /// 64-bit floating point
    Float,

    /// String value
    String,

    /// Boolean
    Bool,

    /// Container of unnamed, same-typed scalar settings
    Array,
}

impl SettingType {
    /// Convert a numeric type code (0..=6) into a type tag
    pub fn from_code(code: i32) -> ParseResult<Self> {
        match code {
            0 => Ok(SettingType::None),
            1 => Ok(SettingType::Group),
            2 => Ok(SettingType::Int),
            3 => Ok(SettingType::Float),
            4 => Ok(SettingType::String),
            5 => Ok(SettingType::Bool),
            6 => Ok(SettingType::Array),
            _ => Err(ConfigError::invalid_argument(format!(
                "type code {} out of range",
                code
            ))),
        }
    }

    /// Numeric type code of this tag
    pub fn code(self) -> i32 {
        match self {
            SettingType::None => 0,
            SettingType::Group => 1,
            SettingType::Int => 2,
            SettingType::Float => 3,
            SettingType::String => 4,
            SettingType::Bool => 5,
            SettingType::Array => 6,
        }
    }

    /// Whether settings of this type hold a child list
    pub fn is_aggregate(self) -> bool {
        matches!(self, SettingType::Group | SettingType::Array)
    }

    /// Whether settings of this type hold a single scalar
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            SettingType::Int | SettingType::Float | SettingType::String | SettingType::Bool
        )
    }

    /// Get a human-readable type name
    pub fn name(self) -> &'static str {
        match self {
            SettingType::None => "None",
            SettingType::Group => "Group",
            SettingType::Int => "Int",
            SettingType::Float => "Float",
            SettingType::String => "String",
            SettingType::Bool => "Bool",
            SettingType::Array => "Array",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload held by a setting
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),

    /// Members of a group or elements of an array
    List(SettingList),
}

impl Value {
    /// Type tag of a scalar payload. Lists report `None` since the tag
    /// alone tells groups and arrays apart.
    pub fn scalar_type(&self) -> SettingType {
        match self {
            Value::Bool(_) => SettingType::Bool,
            Value::Int(_) => SettingType::Int,
            Value::Float(_) => SettingType::Float,
            Value::Str(_) => SettingType::String,
            Value::List(_) => SettingType::None,
        }
    }

    pub fn as_list(&self) -> Option<&SettingList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut SettingList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}
