//! Path mapping between the component tree and the story tree.
//!
//! All paths handed to generated code use forward slashes, whatever the host
//! separator, so output is identical across platforms.

use convert_case::{Case, Casing};
use std::io;
use std::path::{Component, Path, PathBuf};

/// A discovered component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// Identifier bound to the default import, e.g. `ButtonComponent`.
    pub name: String,

    /// Path to the component source file.
    pub source_path: PathBuf,

    /// Root-relative path without extension, e.g. `forms/Button`.
    pub relative_title_path: String,
}

impl ComponentDescriptor {
    /// Describe `source_path`, found under `views_root`.
    pub fn new(views_root: &Path, source_path: &Path, name_suffix: &str) -> Self {
        let base = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name: component_identifier(&base, name_suffix),
            source_path: source_path.to_path_buf(),
            relative_title_path: title_path_from(views_root, source_path),
        }
    }

    /// Describe a component whose base name is already known.
    ///
    /// Used when the component extension has several dots (`Card.page.vue`
    /// with extension `page.vue` has base `Card`).
    pub fn with_base_name(
        views_root: &Path,
        source_path: &Path,
        base: &str,
        name_suffix: &str,
    ) -> Self {
        let dir = source_path
            .parent()
            .map(|dir| relative_path(views_root, dir))
            .unwrap_or_default();
        let relative_title_path = if dir.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", dir, base)
        };

        Self {
            name: component_identifier(base, name_suffix),
            source_path: source_path.to_path_buf(),
            relative_title_path,
        }
    }
}

/// Relative import path from the story file's directory to the component.
///
/// Relative inputs are resolved against the current directory first, so the
/// two paths may be given in any mix of absolute and relative forms.
pub fn import_path_from(
    output_file_dir: &Path,
    component_source_path: &Path,
) -> io::Result<String> {
    if output_file_dir.is_absolute() && component_source_path.is_absolute() {
        return Ok(dot_relative(output_file_dir, component_source_path));
    }
    let cwd = std::env::current_dir()?;
    Ok(import_path_within(&cwd, output_file_dir, component_source_path))
}

/// [`import_path_from`] with an explicit base directory for relative inputs.
///
/// The result always starts with `.` so bundlers resolve it as a relative
/// module.
pub fn import_path_within(
    base: &Path,
    output_file_dir: &Path,
    component_source_path: &Path,
) -> String {
    dot_relative(&base.join(output_file_dir), &base.join(component_source_path))
}

fn dot_relative(from: &Path, to: &Path) -> String {
    let relative = relative_path(from, to);
    if relative.starts_with('.') {
        relative
    } else {
        format!("./{}", relative)
    }
}

/// Root-relative path of the component with its extension removed.
pub fn title_path_from(views_root: &Path, component_source_path: &Path) -> String {
    let without_ext = component_source_path.with_extension("");
    relative_path(views_root, &without_ext)
}

/// Lexical relative path from directory `from` to `to`, joined with `/`.
fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);

    // Different roots or drive prefixes have no relative form.
    let rooted = |parts: &[String]| {
        parts
            .first()
            .map_or(false, |p| p.is_empty() || p.ends_with(':'))
    };
    if rooted(&from) != rooted(&to) || (rooted(&from) && from.first() != to.first()) {
        return to.join("/");
    }

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from.len() {
        parts.push("..");
    }
    parts.extend(to[common..].iter().map(String::as_str));
    parts.join("/")
}

/// Split a path into string segments, folding `.` and `..` lexically.
///
/// A root directory becomes an empty leading segment and a Windows prefix
/// keeps its `C:` form, so joining with `/` yields a forward-slash path.
fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned());
            }
            Component::RootDir => {
                if parts.is_empty() {
                    parts.push(String::new());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." && !last.is_empty() && !last.ends_with(':') => {
                    parts.pop();
                }
                _ => parts.push("..".to_string()),
            },
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }
    parts
}

/// Build the JavaScript identifier for a component's default import.
///
/// Base names that are already identifiers are kept verbatim; others are
/// PascalCased and stripped of characters an identifier cannot hold.
pub fn component_identifier(base: &str, suffix: &str) -> String {
    if is_identifier(base) {
        return format!("{}{}", base, suffix);
    }

    let mut ident: String = base
        .to_case(Case::Pascal)
        .chars()
        .filter(|c| is_identifier_char(*c))
        .collect();

    if ident.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    format!("{}{}", ident, suffix)
}

/// Whether `name` is a plain JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_char(first) && !first.is_ascii_digit() => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
