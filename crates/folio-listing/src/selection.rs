use serde::{Deserialize, Serialize};

/// Ordered set of selected tag ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSelection {
    ids: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as a `tags=ai,research` query value.
    ///
    /// Entries are trimmed; empty entries and repeats are dropped.
    pub fn parse(list: &str) -> Self {
        list.split(',').map(str::trim).filter(|id| !id.is_empty()).collect()
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_owned());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Comma-separated form, the inverse of [`TagSelection::parse`].
    pub fn to_query(&self) -> String {
        self.ids.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            let id = id.into();
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }
}

impl From<Vec<String>> for TagSelection {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<TagSelection> for Vec<String> {
    fn from(selection: TagSelection) -> Self {
        selection.ids
    }
}
