//! Obsidian vault conventions: note-safe filenames and `[[wikilinks]]`

use serde::{Serialize, Serializer};
use std::fmt;

/// Replace or remove characters Obsidian does not allow in note filenames.
///
/// Substitutions are made in a single pass over the input, then surrounding
/// whitespace is trimmed:
///
/// | input | output |
/// |-------|--------|
/// | `/` `\` `\|` | `-` |
/// | `:` | ` -` |
/// | `*` `?` `"` `<` `>` `.` | removed |
///
/// ```
/// use marquee_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Se7en: A Tale"), "Se7en - A Tale");
/// ```
pub fn sanitize_filename(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '/' | '\\' | '|' => out.push('-'),
            ':' => out.push_str(" -"),
            '*' | '?' | '"' | '<' | '>' | '.' => {}
            other => out.push(other),
        }
    }
    out.trim().to_string()
}

/// An Obsidian internal link target, rendered as `[[name]]`.
///
/// Serializes to the bracketed form so links can be dropped straight into
/// YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(String);

impl Link {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The link target without brackets
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Embed form, `![[name]]`, used for attachments.
    pub fn embed(&self) -> String {
        format!("!{self}")
    }

    /// Join links as `[[a]], [[b]]` for inline body text.
    pub fn inline(links: &[Link]) -> String {
        links
            .iter()
            .map(Link::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}]]", self.0)
    }
}

impl From<&str> for Link {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Link {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
