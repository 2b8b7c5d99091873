//! Canonical text output for a setting tree.
//!
//! Output is a depth-first, pre-order walk:
//!
//! ```text
//! name = 1;
//! list = [ 1, 2, 3 ];
//! group
//!   {
//!   child = "text";
//!   }
//! ```
//!
//! The root group is written without a name or braces. Settings whose type
//! was never assigned carry no value and are skipped.

use crate::config::{Config, ConfigOptions};
use crate::escaping::escape;
use crate::setting::{Setting, SettingId};
use crate::types::SettingType;

enum Step {
    /// Write a setting at the given depth
    Enter(SettingId, usize),
    /// Close a group whose braces sit at the given depth
    Close(usize),
}

/// Serializer over a borrowed tree
pub struct Writer<'a> {
    config: &'a Config,
    options: &'a ConfigOptions,
}

impl<'a> Writer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            options: config.options(),
        }
    }

    /// Serialize the whole tree.
    ///
    /// The walk keeps its own stack; nesting depth is bounded only by
    /// memory.
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        let mut pending: Vec<Step> = Vec::new();
        self.push_children(self.config.root(), 0, &mut pending);

        while let Some(step) = pending.pop() {
            match step {
                Step::Close(depth) => {
                    output.push_str(&format!("{}}}\n", self.indent(depth)));
                }
                Step::Enter(id, depth) => {
                    if self.write_setting(id, depth, &mut output) {
                        pending.push(Step::Close(depth + 1));
                        self.push_children(id, depth + 1, &mut pending);
                    }
                }
            }
        }

        output
    }

    /// Queue the members of `id` so the first one is popped first
    fn push_children(&self, id: SettingId, depth: usize, pending: &mut Vec<Step>) {
        let children: Vec<SettingId> = self.config.children(id).collect();
        pending.extend(children.into_iter().rev().map(|child| Step::Enter(child, depth)));
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.options.indent_width)
    }

    /// Write one setting's own lines. Returns true when a group was opened
    /// and its members and closing brace still have to follow.
    fn write_setting(&self, id: SettingId, depth: usize, output: &mut String) -> bool {
        let Some(setting) = self.config.setting(id) else {
            return false;
        };
        let name = setting.name().unwrap_or_default();

        match setting.setting_type() {
            SettingType::None => false,

            SettingType::Group => {
                output.push_str(&format!("{}{}\n", self.indent(depth), name));
                output.push_str(&format!("{}{{\n", self.indent(depth + 1)));
                true
            }

            SettingType::Array => {
                let values: Vec<String> = self
                    .config
                    .children(id)
                    .filter_map(|elem| self.config.setting(elem))
                    .filter_map(|elem| self.format_scalar(elem))
                    .collect();

                output.push_str(&format!("{}{} = [ ", self.indent(depth), name));
                if !values.is_empty() {
                    output.push_str(&values.join(", "));
                    output.push(' ');
                }
                output.push_str("];\n");
                false
            }

            _ => {
                if let Some(value) = self.format_scalar(setting) {
                    output.push_str(&format!("{}{} = {};\n", self.indent(depth), name, value));
                }
                false
            }
        }
    }

    /// Text form of a scalar; `None` for untyped settings and containers
    pub fn format_scalar(&self, setting: &Setting) -> Option<String> {
        match setting.setting_type() {
            SettingType::Bool => Some(if setting.get_bool() { "TRUE" } else { "FALSE" }.to_string()),
            SettingType::Int => Some(setting.get_int().to_string()),
            SettingType::Float => Some(self.format_float(setting.get_float())),
            SettingType::String => Some(format!(
                "\"{}\"",
                escape(setting.get_string().unwrap_or_default())
            )),
            SettingType::None | SettingType::Group | SettingType::Array => None,
        }
    }

    /// Fixed-point text that always reads back as a float, even at zero
    /// precision
    fn format_float(&self, value: f64) -> String {
        let mut text = format!("{:.*}", self.options.float_precision, value);
        if value.is_finite() && !text.contains(['.', 'e', 'E']) {
            text.push_str(".0");
        }
        text
    }
}
