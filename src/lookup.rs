//! Path resolution over the setting tree.
//!
//! Paths are segment names separated by any of [`PATH_DELIMITERS`]
//! (`a.b.c`, `a:b:c` and `a/b/c` are equivalent). Leading, trailing and
//! repeated delimiters are skipped.

use crate::config::Config;
use crate::setting::SettingId;
use std::cmp::Ordering;

/// Characters that separate path segments
pub const PATH_DELIMITERS: &[char] = &[':', '.', '/'];

fn is_delimiter(c: char) -> bool {
    PATH_DELIMITERS.contains(&c)
}

/// Compare two names up to the point where either ends or reaches a path
/// delimiter.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let mut left = a.chars();
    let mut right = b.chars();

    loop {
        let p = left.next().filter(|c| !is_delimiter(*c));
        let q = right.next().filter(|c| !is_delimiter(*c));

        match (p, q) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(p), Some(q)) if p != q => return p.cmp(&q),
            _ => {}
        }
    }
}

/// Whether `segment` names `stored`, ignoring anything past a delimiter
pub fn names_match(segment: &str, stored: &str) -> bool {
    compare_names(segment, stored) == Ordering::Equal
}

impl Config {
    /// Resolve a delimited path starting at the root group.
    ///
    /// Returns `None` as soon as a segment has no matching member. An empty
    /// path resolves to the root.
    pub fn lookup(&self, path: &str) -> Option<SettingId> {
        let mut current = self.root();
        let mut rest = path;

        loop {
            rest = rest.trim_start_matches(is_delimiter);
            if rest.is_empty() {
                break;
            }

            current = self.get_member(current, rest)?;

            let end = rest.find(is_delimiter).unwrap_or(rest.len());
            rest = &rest[end..];
        }

        Some(current)
    }

    /// Integer at `path`, or 0 on a miss or type mismatch
    pub fn lookup_int(&self, path: &str) -> i64 {
        self.lookup(path)
            .and_then(|id| self.setting(id))
            .map_or(0, |s| s.get_int())
    }

    /// Float at `path`, or 0.0 on a miss or type mismatch
    pub fn lookup_float(&self, path: &str) -> f64 {
        self.lookup(path)
            .and_then(|id| self.setting(id))
            .map_or(0.0, |s| s.get_float())
    }

    /// Boolean at `path`, or false on a miss or type mismatch
    pub fn lookup_bool(&self, path: &str) -> bool {
        self.lookup(path)
            .and_then(|id| self.setting(id))
            .is_some_and(|s| s.get_bool())
    }

    /// String at `path`, or `None` on a miss or type mismatch
    pub fn lookup_string(&self, path: &str) -> Option<&str> {
        self.lookup(path)
            .and_then(|id| self.setting(id))
            .and_then(|s| s.get_string())
    }

    /// Dotted path from the root to `id`. Array elements contribute their
    /// index; the root's path is empty.
    pub fn path_of(&self, id: SettingId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = id;

        while let Some(parent) = self.setting(current)?.parent() {
            let setting = self.setting(current)?;
            match setting.name() {
                Some(name) => segments.push(name.to_string()),
                None => {
                    let index = self.children(parent).position(|child| child == current)?;
                    segments.push(index.to_string());
                }
            }
            current = parent;
        }

        segments.reverse();
        Some(segments.join("."))
    }
}
