use std::collections::HashSet;

/// Trims every tag, drops the empty ones and removes case-insensitive
/// duplicates. The first occurrence wins, keeping its casing and position.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for raw in tags {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

/// Keys the tag editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    /// Enter or `,`: commit the pending input as a tag.
    Delimiter,
    /// Removes the last tag, but only while the pending input is empty.
    Backspace,
}

/// Incremental tag entry: a pending input line plus the committed tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagEditor {
    input: String,
    tags: Vec<String>,
}

impl TagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing tags, normalizing them.
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            input: String::new(),
            tags: normalize_tags(tags),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input<S: Into<String>>(&mut self, input: S) {
        self.input = input.into();
    }

    fn position(&self, tag: &str) -> Option<usize> {
        let key = tag.trim().to_lowercase();
        self.tags.iter().position(|t| t.to_lowercase() == key)
    }

    /// Adds a tag at the end. A case-insensitive duplicate is replaced, so
    /// the latest casing wins and the tag moves to the end. Blank input is
    /// ignored. Returns whether the tag list changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return false;
        }
        if let Some(index) = self.position(trimmed) {
            self.tags.remove(index);
        }
        self.tags.push(trimmed.to_string());
        true
    }

    /// Removes the tag matching `tag` case-insensitively.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true when the key was consumed by the editor.
    pub fn handle_key(&mut self, key: TagKey) -> bool {
        match key {
            TagKey::Delimiter => {
                if self.input.trim().is_empty() {
                    return false;
                }
                let pending = std::mem::take(&mut self.input);
                self.add_tag(&pending);
                true
            }
            TagKey::Backspace => {
                if !self.input.is_empty() {
                    return false;
                }
                self.tags.pop().is_some()
            }
        }
    }
}
