//! # Domain Model
//!
//! A linkboard is a [`Collection`]: an ordered list of [`Section`]s, each holding an
//! ordered list of [`Link`]s.
//!
//! ## Ordering Is Positional
//!
//! There is no rank field anywhere. A section's place in the collection, and a link's
//! place in its section, *is* its order. Links have no identity at all beyond that
//! position: two links with the same name and url are distinct entries.
//!
//! Sections carry a stable `id` (`sec-<uuid>`) used for anchors and lookup. Ids are
//! never reused: [`Collection::fresh_section_id`] draws until it finds one that the
//! live collection does not already contain.
//!
//! ## Snapshot Format
//!
//! A collection serializes as a bare JSON array, no envelope, no version:
//!
//! ```json
//! [
//!   { "id": "sec-1", "title": "Work", "color": "cyan",
//!     "links": [ { "name": "Mail", "url": "https://mail.example.com" } ] }
//! ]
//! ```
//!
//! Older snapshots may omit `links` or `color`. Both are filled in on read, and
//! `links` is always written back as an explicit (possibly empty) array.
//!
//! ## Index Operations
//!
//! Everything here is index based and bounds checked. Out-of-range indexes never
//! panic: the operation reports that nothing happened (`None` / `false`) and leaves
//! the collection untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

pub const DEFAULT_COLOR: &str = "cyan";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            links: Vec::new(),
        }
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    sections: Vec<Section>,
}

impl From<Vec<Section>> for Collection {
    fn from(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a serialized snapshot.
    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        Ok(serde_json::from_str(snapshot)?)
    }

    /// Compact form, used for the local cache.
    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty form (two-space indent), used for the remote document.
    pub fn to_pretty_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Number of links in a section, `None` if the section does not exist.
    pub fn link_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(|s| s.links.len())
    }

    pub fn fresh_section_id(&self) -> String {
        loop {
            let candidate = format!("sec-{}", Uuid::new_v4().simple());
            if self.position_of(&candidate).is_none() {
                return candidate;
            }
        }
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        if index < self.sections.len() {
            Some(self.sections.remove(index))
        } else {
            None
        }
    }

    /// Remove-then-insert. `dest` is the index in the post-removal sequence.
    pub fn move_section(&mut self, src: usize, dest: usize) -> bool {
        move_within(&mut self.sections, src, dest)
    }

    pub fn push_link(&mut self, section: usize, link: Link) -> bool {
        match self.sections.get_mut(section) {
            Some(s) => {
                s.links.push(link);
                true
            }
            None => false,
        }
    }

    pub fn replace_link(&mut self, section: usize, index: usize, link: Link) -> Option<Link> {
        let slot = self.sections.get_mut(section)?.links.get_mut(index)?;
        Some(std::mem::replace(slot, link))
    }

    pub fn remove_link(&mut self, section: usize, index: usize) -> Option<Link> {
        let links = &mut self.sections.get_mut(section)?.links;
        if index < links.len() {
            Some(links.remove(index))
        } else {
            None
        }
    }

    /// Remove-then-insert inside one section's links.
    pub fn move_link(&mut self, section: usize, src: usize, dest: usize) -> bool {
        match self.sections.get_mut(section) {
            Some(s) => move_within(&mut s.links, src, dest),
            None => false,
        }
    }
}

/// Moves `items[src]` so that it ends up at `dest` once the move is complete.
///
/// Returns `false` (untouched) when either index is out of range or the move would
/// not change the order.
fn move_within<T>(items: &mut Vec<T>, src: usize, dest: usize) -> bool {
    if src >= items.len() || dest >= items.len() || src == dest {
        return false;
    }
    let item = items.remove(src);
    items.insert(dest, item);
    true
}
