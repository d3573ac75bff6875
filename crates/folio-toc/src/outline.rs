//! Hierarchical heading outline.

use crate::extract::{Heading, headings};

/// A heading and the headings nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadingNode {
    pub id: String,
    pub text: String,
    pub level: u8,
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Whether this node or any descendant has the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|child| child.contains(id))
    }
}

impl From<Heading> for HeadingNode {
    fn from(heading: Heading) -> Self {
        Self {
            id: heading.id,
            text: heading.text,
            level: heading.level,
            children: Vec::new(),
        }
    }
}

/// Forest of headings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Outline {
    roots: Vec<HeadingNode>,
}

impl Outline {
    /// Extract and nest the level-2/3 headings of a markdown document.
    pub fn from_source(source: &str) -> Self {
        Self::build(headings(source))
    }

    /// Nest headings by level.
    ///
    /// Each heading becomes a child of the nearest preceding open heading
    /// with a strictly lower level, or a new root if there is none. Works
    /// for any levels, including skips such as 2 then 4.
    pub fn build<I>(headings: I) -> Self
    where
        I: IntoIterator<Item = Heading>,
    {
        let mut roots = Vec::new();
        let mut open: Vec<HeadingNode> = Vec::new();

        for heading in headings {
            close_open(&mut open, &mut roots, heading.level);
            open.push(heading.into());
        }
        close_open(&mut open, &mut roots, 0);

        Self { roots }
    }

    pub fn roots(&self) -> &[HeadingNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<HeadingNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order traversal of every node.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roots.iter().any(|root| root.contains(id))
    }

    /// The root whose subtree holds `id`.
    ///
    /// Used to expand and highlight the section containing the active
    /// heading.
    pub fn active_root(&self, id: &str) -> Option<&HeadingNode> {
        self.roots.iter().find(|root| root.contains(id))
    }
}

/// Pop open nodes whose level is at least `level`, attaching each to its
/// parent (or to the roots).
fn close_open(open: &mut Vec<HeadingNode>, roots: &mut Vec<HeadingNode>, level: u8) {
    while open.last().is_some_and(|top| top.level >= level) {
        let Some(node) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Pre-order iterator over an [`Outline`].
pub struct Iter<'a> {
    stack: Vec<&'a HeadingNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a HeadingNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a HeadingNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
