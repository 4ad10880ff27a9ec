//! Identifiers shared by the surface and the document model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle for a node of the presentation surface.
///
/// The engine never dereferences these; integration layers keep their own
/// table from handle to live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceNodeId(pub u64);

impl SurfaceNodeId {
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Position of a node in the document model, one index per depth.
///
/// Paths order lexicographically, so a parent sorts before its children and
/// earlier siblings sort before later ones (document order).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(Vec<usize>);

impl DocumentPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The enclosing node's path, or `None` for the root.
    pub fn parent(&self) -> Option<DocumentPath> {
        let (_, head) = self.0.split_last()?;
        Some(Self(head.to_vec()))
    }
}

impl From<Vec<usize>> for DocumentPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for DocumentPath {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}

/// Element tag name.
///
/// Surfaces report upper-case names (`P`, `DIV`) while models usually use
/// lower-case ones, so tags are folded to ASCII lower-case on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caret position: a text node path plus a UTF-16 offset into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub path: DocumentPath,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<DocumentPath>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

/// The document model's selection. Anchor is where it started, focus where
/// it ends; the two are not normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.anchor != self.focus
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        !self.is_expanded()
    }

    /// `(start, end)` in document order.
    pub fn ordered(&self) -> (&Point, &Point) {
        let anchor_first = (&self.anchor.path, self.anchor.offset)
            <= (&self.focus.path, self.focus.offset);
        if anchor_first {
            (&self.anchor, &self.focus)
        } else {
            (&self.focus, &self.anchor)
        }
    }
}
