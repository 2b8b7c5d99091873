use crate::builder::Builder;
use crate::error::{ConfigError, ParseResult};
use crate::lexer::LibconfLexer;
use crate::setting::{Setting, SettingId};
use crate::types::{SettingType, Value};
use crate::writer::Writer;
use std::any::Any;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Error text recorded when a file or stream cannot be used
pub const IO_ERROR_TEXT: &str = "file I/O error";

/// Teardown callback receiving each destroyed setting's hook
pub type Destructor = Box<dyn FnMut(Box<dyn Any>)>;

/// Output options
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOptions {
    /// Spaces per nesting level
    pub indent_width: usize,

    /// Digits after the decimal point for floats
    pub float_precision: usize,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            float_precision: 8,
        }
    }
}

struct Slot {
    generation: u32,
    setting: Option<Setting>,
}

/// A configuration tree.
///
/// Owns every setting, starting from an unnamed root group. Settings are
/// addressed through [`SettingId`] handles; the parent/child links are
/// handles too, so no setting owns another directly.
pub struct Config {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: SettingId,
    destructor: Option<Destructor>,
    options: ConfigOptions,
    error_text: Option<String>,
    error_line: usize,
}

impl Config {
    /// Create an empty configuration with default options
    pub fn new() -> Self {
        Self::with_options(ConfigOptions::default())
    }

    /// Create an empty configuration with custom options
    pub fn with_options(options: ConfigOptions) -> Self {
        let mut config = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: SettingId::new(0, 0),
            destructor: None,
            options,
            error_text: None,
            error_line: 0,
        };
        config.root = config.alloc(Setting::new(None, SettingType::Group, None));
        config
    }

    /// Register the callback that receives hooks of destroyed settings.
    /// The callback survives [`Config::read`].
    pub fn set_destructor<F>(&mut self, destructor: F)
    where
        F: FnMut(Box<dyn Any>) + 'static,
    {
        self.destructor = Some(Box::new(destructor));
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// The root group
    pub fn root(&self) -> SettingId {
        self.root
    }

    /// Text of the last read failure
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Line of the last parse failure, 0 if none
    pub fn error_line(&self) -> usize {
        self.error_line
    }

    pub fn setting(&self, id: SettingId) -> Option<&Setting> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.setting.as_ref()
    }

    pub fn setting_mut(&mut self, id: SettingId) -> Option<&mut Setting> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.setting.as_mut()
    }

    /// Members of a group or elements of an array, in order
    pub fn children(&self, id: SettingId) -> impl Iterator<Item = SettingId> + '_ {
        self.setting(id)
            .and_then(Setting::list)
            .into_iter()
            .flat_map(|list| list.iter())
    }

    /// Number of members or elements; 0 for scalars and stale handles
    pub fn length(&self, id: SettingId) -> usize {
        self.setting(id).map_or(0, Setting::len)
    }

    /// Number of live settings, root included
    pub fn setting_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn alloc(&mut self, setting: Setting) -> SettingId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.setting = Some(setting);
            SettingId::new(index, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 0,
                setting: Some(setting),
            });
            SettingId::new(self.slots.len() - 1, 0)
        }
    }

    fn release(&mut self, id: SettingId) -> Option<Setting> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let setting = slot.setting.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        Some(setting)
    }

    /// Destroy a setting and everything below it. Children go first; the
    /// setting's own hook is handed to the destructor last. Iterative, so
    /// depth is bounded only by memory.
    fn destroy(&mut self, id: SettingId) {
        let mut pending = vec![(id, false)];

        while let Some((current, expanded)) = pending.pop() {
            if expanded {
                let Some(mut setting) = self.release(current) else {
                    continue;
                };
                if let Some(hook) = setting.take_hook() {
                    if let Some(destructor) = self.destructor.as_mut() {
                        destructor(hook);
                    }
                }
                continue;
            }

            let children = self
                .setting_mut(current)
                .and_then(Setting::take_list)
                .map(|mut list| list.take_all())
                .unwrap_or_default();

            pending.push((current, true));
            pending.extend(children.into_iter().rev().map(|child| (child, false)));
        }
    }

    /// Drop all content and start over with an empty root group, keeping
    /// the destructor and options
    fn reinitialize(&mut self) {
        self.destroy(self.root);
        self.root = self.alloc(Setting::new(None, SettingType::Group, None));
        self.error_text = None;
        self.error_line = 0;
    }

    /// Attach a new setting to a group or array without any duplicate check.
    /// Returns `None` if `parent` is not a container.
    pub(crate) fn create(
        &mut self,
        parent: SettingId,
        name: Option<String>,
        setting_type: SettingType,
    ) -> Option<SettingId> {
        if !self.setting(parent)?.setting_type().is_aggregate() {
            return None;
        }

        trace!(setting = ?name, setting_type = %setting_type, "creating setting");
        let id = self.alloc(Setting::new(name, setting_type, Some(parent)));
        match self.setting_mut(parent) {
            Some(container) => {
                container.ensure_list().append(id);
                Some(id)
            }
            None => {
                self.release(id);
                None
            }
        }
    }

    /// Add a member to a group or an element to an array.
    ///
    /// Group members need a unique, well-formed name. Array elements are
    /// always unnamed (`name` is ignored), must be scalars, and must match
    /// the type of the array's first element.
    pub fn add(
        &mut self,
        parent: SettingId,
        name: Option<&str>,
        setting_type: SettingType,
    ) -> ParseResult<SettingId> {
        let container = self
            .setting(parent)
            .ok_or_else(|| ConfigError::not_found("parent setting"))?;

        let name = match container.setting_type() {
            SettingType::Group => {
                let name = name.ok_or_else(|| {
                    ConfigError::invalid_argument("group members must be named")
                })?;
                if !is_valid_name(name) {
                    return Err(ConfigError::invalid_argument(format!(
                        "invalid setting name '{}'",
                        name
                    )));
                }
                if self.get_member(parent, name).is_some() {
                    return Err(ConfigError::already_exists(name));
                }
                Some(name.to_string())
            }
            SettingType::Array => {
                if !setting_type.is_scalar() {
                    return Err(ConfigError::invalid_argument(format!(
                        "array elements must be scalars, not {}",
                        setting_type
                    )));
                }
                self.check_element_type(parent, setting_type)?;
                None
            }
            other => return Err(ConfigError::type_mismatch("Group or Array", other.name())),
        };

        self.create(parent, name, setting_type)
            .ok_or_else(|| ConfigError::invalid_argument("cannot attach setting"))
    }

    /// [`Config::add`] taking a numeric type code
    pub fn add_with_code(
        &mut self,
        parent: SettingId,
        name: Option<&str>,
        type_code: i32,
    ) -> ParseResult<SettingId> {
        let setting_type = SettingType::from_code(type_code)?;
        self.add(parent, name, setting_type)
    }

    /// Remove a named member of a group, destroying it and its descendants.
    /// Sibling order is preserved.
    pub fn remove(&mut self, parent: SettingId, name: &str) -> ParseResult<()> {
        let container = self
            .setting(parent)
            .ok_or_else(|| ConfigError::not_found("parent setting"))?;
        if !container.is_group() {
            return Err(ConfigError::type_mismatch("Group", container.setting_type().name()));
        }

        let (child, index) = container
            .list()
            .and_then(|list| list.find(name, |id| self.setting(id).and_then(Setting::name)))
            .ok_or_else(|| ConfigError::not_found(name))?;

        if let Some(list) = self.setting_mut(parent).and_then(Setting::list_mut) {
            list.remove(index);
        }
        trace!(setting = name, index, "removing setting");
        self.destroy(child);
        Ok(())
    }

    /// First member of a group whose name matches `name`
    pub fn get_member(&self, group: SettingId, name: &str) -> Option<SettingId> {
        let setting = self.setting(group)?;
        if !setting.is_group() {
            return None;
        }
        setting
            .list()?
            .find(name, |id| self.setting(id).and_then(Setting::name))
            .map(|(id, _)| id)
    }

    /// Member or element at `index` of a group or array
    pub fn get_elem(&self, container: SettingId, index: usize) -> Option<SettingId> {
        self.setting(container)?.list()?.get(index)
    }

    fn check_element_type(&self, array: SettingId, setting_type: SettingType) -> ParseResult<()> {
        match self.get_elem(array, 0).and_then(|first| self.setting(first)) {
            Some(first) if first.setting_type() != setting_type => Err(ConfigError::type_mismatch(
                first.setting_type().name(),
                setting_type.name(),
            )),
            _ => Ok(()),
        }
    }

    /// Write a scalar into an array element. `None` appends a new element,
    /// `Some(i)` overwrites an existing one.
    pub(crate) fn set_elem_value(
        &mut self,
        array: SettingId,
        index: Option<usize>,
        value: Value,
    ) -> ParseResult<SettingId> {
        let setting = self
            .setting(array)
            .ok_or_else(|| ConfigError::not_found("array setting"))?;
        if !setting.is_array() {
            return Err(ConfigError::type_mismatch("Array", setting.setting_type().name()));
        }

        let element_type = value.scalar_type();
        if !element_type.is_scalar() {
            return Err(ConfigError::invalid_argument("array elements must be scalars"));
        }

        let element = match index {
            None => {
                self.check_element_type(array, element_type)?;
                self.create(array, None, element_type)
                    .ok_or_else(|| ConfigError::invalid_argument("cannot append element"))?
            }
            Some(i) => self.get_elem(array, i).ok_or_else(|| {
                ConfigError::invalid_argument(format!("index {} out of range", i))
            })?,
        };

        self.setting_mut(element)
            .ok_or_else(|| ConfigError::not_found("array element"))?
            .assign(value)?;
        Ok(element)
    }

    pub fn get_int_elem(&self, array: SettingId, index: usize) -> i64 {
        self.get_elem(array, index)
            .and_then(|id| self.setting(id))
            .map_or(0, Setting::get_int)
    }

    pub fn get_float_elem(&self, array: SettingId, index: usize) -> f64 {
        self.get_elem(array, index)
            .and_then(|id| self.setting(id))
            .map_or(0.0, Setting::get_float)
    }

    pub fn get_bool_elem(&self, array: SettingId, index: usize) -> bool {
        self.get_elem(array, index)
            .and_then(|id| self.setting(id))
            .is_some_and(Setting::get_bool)
    }

    pub fn get_string_elem(&self, array: SettingId, index: usize) -> Option<&str> {
        self.get_elem(array, index)
            .and_then(|id| self.setting(id))
            .and_then(Setting::get_string)
    }

    pub fn set_int_elem(&mut self, array: SettingId, index: Option<usize>, value: i64) -> ParseResult<SettingId> {
        self.set_elem_value(array, index, Value::Int(value))
    }

    pub fn set_float_elem(&mut self, array: SettingId, index: Option<usize>, value: f64) -> ParseResult<SettingId> {
        self.set_elem_value(array, index, Value::Float(value))
    }

    pub fn set_bool_elem(&mut self, array: SettingId, index: Option<usize>, value: bool) -> ParseResult<SettingId> {
        self.set_elem_value(array, index, Value::Bool(value))
    }

    pub fn set_string_elem(
        &mut self,
        array: SettingId,
        index: Option<usize>,
        value: impl Into<String>,
    ) -> ParseResult<SettingId> {
        self.set_elem_value(array, index, Value::Str(value.into()))
    }

    /// Replace the tree with the contents of `reader`.
    ///
    /// Prior content is discarded first. On failure the tree is left empty
    /// and [`Config::error_text`]/[`Config::error_line`] describe the problem.
    pub fn read<R: Read>(&mut self, mut reader: R) -> ParseResult<()> {
        self.reinitialize();

        let mut input = String::new();
        if let Err(e) = reader.read_to_string(&mut input) {
            warn!(error = %e, "failed to read configuration stream");
            self.error_text = Some(IO_ERROR_TEXT.to_string());
            return Err(ConfigError::io("<stream>", e.to_string()));
        }

        self.build(&input)
    }

    /// Replace the tree with the contents of a string
    pub fn read_str(&mut self, input: &str) -> ParseResult<()> {
        self.reinitialize();
        self.build(input)
    }

    /// Replace the tree with the contents of a file
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration file");

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open configuration file");
                self.error_text = Some(IO_ERROR_TEXT.to_string());
                return Err(ConfigError::io(path.display().to_string(), e.to_string()));
            }
        };

        self.read(BufReader::new(file))
    }

    fn build(&mut self, input: &str) -> ParseResult<()> {
        debug!(bytes = input.len(), "parsing configuration");

        let result = LibconfLexer::tokenize(input).and_then(|tokens| {
            let mut builder = Builder::new(self);
            builder.feed_all(tokens)?;
            builder.finish()
        });

        match result {
            Ok(()) => {
                debug!(settings = self.setting_count(), "configuration parsed");
                Ok(())
            }
            Err(err) => {
                self.reinitialize();
                let line = err.line().unwrap_or(0);
                let message = match &err {
                    ConfigError::ParseError { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                warn!(line, error = %message, "configuration parse aborted");
                self.error_line = line;
                self.error_text = Some(message);
                Err(err)
            }
        }
    }

    /// Serialize the tree to canonical text.
    ///
    /// NaN and infinite floats have no literal form; their text will not
    /// read back. [`Config::write`] refuses such trees.
    pub fn serialize(&self) -> String {
        Writer::new(self).serialize()
    }

    /// First live float setting whose value has no literal form
    fn non_finite_float(&self) -> Option<SettingId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let setting = slot.setting.as_ref()?;
            let unwritable =
                setting.setting_type() == SettingType::Float && !setting.get_float().is_finite();
            unwritable.then(|| SettingId::new(index, slot.generation))
        })
    }

    fn check_writable(&self) -> ParseResult<()> {
        match self.non_finite_float() {
            Some(id) => Err(ConfigError::invalid_argument(format!(
                "float '{}' is not finite and cannot be written",
                self.path_of(id).unwrap_or_default()
            ))),
            None => Ok(()),
        }
    }

    /// Write the tree to `writer` in canonical form. Fails with
    /// `InvalidArgument`, writing nothing, if any float is NaN or infinite.
    pub fn write<W: Write>(&self, mut writer: W) -> ParseResult<()> {
        self.check_writable()?;
        let text = self.serialize();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        debug!(bytes = text.len(), "configuration written");
        Ok(())
    }

    /// Write the tree to a file, replacing its contents. The file is left
    /// alone if the tree cannot be written.
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "saving configuration file");
        self.check_writable()?;

        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot create configuration file");
                self.error_text = Some(IO_ERROR_TEXT.to_string());
                return Err(ConfigError::io(path.display().to_string(), e.to_string()));
            }
        };

        self.write(BufWriter::new(file)).map_err(|e| match e {
            ConfigError::IoError { message, .. } => {
                ConfigError::io(path.display().to_string(), message)
            }
            other => other,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.destroy(self.root);
    }
}

/// Whether `name` can be written and read back as a setting name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '*' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '*'))
}
