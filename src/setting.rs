//! Settings: the typed nodes of a configuration tree.

use crate::error::{ConfigError, ParseResult};
use crate::list::SettingList;
use crate::types::{SettingType, Value};
use std::any::Any;
use std::fmt;

/// Handle to a setting stored in a [`Config`](crate::Config).
///
/// Handles are cheap to copy and never keep a setting alive. A handle to a
/// removed setting stops resolving, even if its slot is later reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingId {
    index: usize,
    generation: u32,
}

impl SettingId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// One typed, possibly-named node in the configuration tree.
///
/// Scalar accessors follow a sentinel contract: reading with the wrong type
/// yields the type's zero value, so callers that need to tell "absent" from
/// "zero" check [`Setting::setting_type`] first. Writers fail with
/// [`ConfigError::TypeMismatch`] once the type is fixed.
pub struct Setting {
    name: Option<String>,
    setting_type: SettingType,
    value: Option<Value>,
    parent: Option<SettingId>,
    hook: Option<Box<dyn Any>>,
}

impl Setting {
    pub(crate) fn new(name: Option<String>, setting_type: SettingType, parent: Option<SettingId>) -> Self {
        Self {
            name,
            setting_type,
            value: None,
            parent,
            hook: None,
        }
    }

    /// Member name; `None` for the root and for array elements
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    /// Enclosing group or array; `None` only for the root
    pub fn parent(&self) -> Option<SettingId> {
        self.parent
    }

    pub fn is_group(&self) -> bool {
        self.setting_type == SettingType::Group
    }

    pub fn is_array(&self) -> bool {
        self.setting_type == SettingType::Array
    }

    pub fn is_scalar(&self) -> bool {
        self.setting_type.is_scalar()
    }

    /// Raw payload, absent until a value or first child is assigned
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Number of members of a group or elements of an array; 0 otherwise
    pub fn len(&self) -> usize {
        self.list().map_or(0, SettingList::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn list(&self) -> Option<&SettingList> {
        if !self.setting_type.is_aggregate() {
            return None;
        }
        self.value.as_ref().and_then(Value::as_list)
    }

    pub(crate) fn list_mut(&mut self) -> Option<&mut SettingList> {
        if !self.setting_type.is_aggregate() {
            return None;
        }
        self.value.as_mut().and_then(Value::as_list_mut)
    }

    /// Child list, created on first use
    pub(crate) fn ensure_list(&mut self) -> &mut SettingList {
        if !matches!(self.value, Some(Value::List(_))) {
            self.value = Some(Value::List(SettingList::new()));
        }
        match self.value {
            Some(Value::List(ref mut list)) => list,
            _ => unreachable!("list was just installed"),
        }
    }

    pub(crate) fn take_list(&mut self) -> Option<SettingList> {
        match self.value.take() {
            Some(Value::List(list)) => Some(list),
            other => {
                self.value = other;
                None
            }
        }
    }

    pub(crate) fn take_hook(&mut self) -> Option<Box<dyn Any>> {
        self.hook.take()
    }

    fn pin_type(&mut self, target: SettingType) -> ParseResult<()> {
        if self.setting_type == SettingType::None {
            self.setting_type = target;
        } else if self.setting_type != target {
            return Err(ConfigError::type_mismatch(
                self.setting_type.name(),
                target.name(),
            ));
        }
        Ok(())
    }

    pub fn get_int(&self) -> i64 {
        match (self.setting_type, &self.value) {
            (SettingType::Int, Some(Value::Int(v))) => *v,
            _ => 0,
        }
    }

    pub fn get_float(&self) -> f64 {
        match (self.setting_type, &self.value) {
            (SettingType::Float, Some(Value::Float(v))) => *v,
            _ => 0.0,
        }
    }

    pub fn get_bool(&self) -> bool {
        match (self.setting_type, &self.value) {
            (SettingType::Bool, Some(Value::Bool(v))) => *v,
            _ => false,
        }
    }

    /// String payload; `None` when the type differs or no string was set yet
    pub fn get_string(&self) -> Option<&str> {
        match (self.setting_type, &self.value) {
            (SettingType::String, Some(Value::Str(v))) => Some(v),
            _ => None,
        }
    }

    pub fn set_int(&mut self, value: i64) -> ParseResult<()> {
        self.pin_type(SettingType::Int)?;
        self.value = Some(Value::Int(value));
        Ok(())
    }

    /// Store a float. NaN and infinities are held, but a tree containing
    /// them cannot be written with [`crate::Config::write`].
    pub fn set_float(&mut self, value: f64) -> ParseResult<()> {
        self.pin_type(SettingType::Float)?;
        self.value = Some(Value::Float(value));
        Ok(())
    }

    pub fn set_bool(&mut self, value: bool) -> ParseResult<()> {
        self.pin_type(SettingType::Bool)?;
        self.value = Some(Value::Bool(value));
        Ok(())
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> ParseResult<()> {
        self.pin_type(SettingType::String)?;
        self.value = Some(Value::Str(value.into()));
        Ok(())
    }

    /// Store a scalar payload through the matching typed setter
    pub(crate) fn assign(&mut self, value: Value) -> ParseResult<()> {
        match value {
            Value::Bool(v) => self.set_bool(v),
            Value::Int(v) => self.set_int(v),
            Value::Float(v) => self.set_float(v),
            Value::Str(v) => self.set_string(v),
            Value::List(_) => Err(ConfigError::invalid_argument(
                "lists are attached through add, not assigned",
            )),
        }
    }

    /// Attach host data to this setting. The tree's destructor, if any,
    /// receives it when the setting is destroyed.
    pub fn set_hook(&mut self, hook: Box<dyn Any>) {
        self.hook = Some(hook);
    }

    pub fn hook(&self) -> Option<&dyn Any> {
        self.hook.as_deref()
    }

    pub fn hook_mut(&mut self) -> Option<&mut dyn Any> {
        self.hook.as_deref_mut()
    }

    /// Typed view of the attached hook
    pub fn hook_as<T: 'static>(&self) -> Option<&T> {
        self.hook.as_ref().and_then(|h| h.downcast_ref::<T>())
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("type", &self.setting_type)
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
