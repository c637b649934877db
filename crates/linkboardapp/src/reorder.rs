//! # Reorder Engine
//!
//! Turns a pointer-based drag-and-drop gesture into an exact index move.
//!
//! ## Domains
//!
//! There are two reordering domains and they never interact:
//!
//! - **Sections** within the collection.
//! - **Links** within one specific section.
//!
//! A section drag dropped on a link (or the reverse) is inert. A link dragged out of
//! one section and dropped on a link of another section is also inert: links only
//! move inside their own section.
//!
//! ## Drop Zones
//!
//! While hovering, the target's vertical midpoint decides the insertion side, but
//! only for the *last* item of a domain. Every other target is always "above":
//! inserting after item `i` is the same as inserting above item `i + 1`, so only the
//! last item needs a below-zone to reach the end of the list.
//!
//! ## Destination Index
//!
//! The move itself is remove-then-insert. Removing the source shifts everything after
//! it one slot to the left, so when the source sits before the raw destination the
//! destination is decremented. [`compute_destination_index`] is the whole rule, kept
//! free of any geometry so it can be tested directly:
//!
//! ```text
//! [A, B, C]  drag A, drop below C (last)
//!   raw  = 2 + 1 = 3
//!   src 0 < 3  →  dest = 2
//!   remove A → [B, C], insert at 2 → [B, C, A]
//! ```
//!
//! ## Session State
//!
//! [`DragSession`] holds only the source identity and the current drop marker. Domain
//! length and "is last" are read from the live [`Collection`] on every hover and drop,
//! never cached across a mutation.

use crate::model::Collection;

/// Identity of something being dragged or dropped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragItem {
    Section { index: usize },
    Link { section: usize, index: usize },
}

impl DragItem {
    pub fn index(&self) -> usize {
        match self {
            DragItem::Section { index } | DragItem::Link { index, .. } => *index,
        }
    }

    /// Length of this item's domain and whether the item is its last element.
    /// `None` if the item does not exist in the collection.
    fn locate(&self, collection: &Collection) -> Option<(usize, bool)> {
        let len = match self {
            DragItem::Section { .. } => collection.len(),
            DragItem::Link { section, .. } => collection.link_count(*section)?,
        };
        let index = self.index();
        (index < len).then_some((len, index + 1 == len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Above,
    Below,
}

/// The target's on-screen vertical extent and the pointer's vertical coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub top: f64,
    pub height: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(top: f64, height: f64, y: f64) -> Self {
        Self { top, height, y }
    }

    /// Pointer in the upper half of a unit-height target.
    pub fn above() -> Self {
        Self::new(0.0, 1.0, 0.25)
    }

    /// Pointer in the lower half of a unit-height target.
    pub fn below() -> Self {
        Self::new(0.0, 1.0, 0.75)
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Strictly below: a pointer exactly on the midpoint counts as above.
    pub fn is_below_midpoint(&self) -> bool {
        self.y > self.midpoint()
    }
}

pub fn classify_drop_zone(pointer: PointerPosition, is_target_last: bool) -> DropZone {
    if is_target_last && pointer.is_below_midpoint() {
        DropZone::Below
    } else {
        DropZone::Above
    }
}

/// Index at which the source must be reinserted after it has been removed.
///
/// The raw destination is `target_index`, plus one when the target is the last item
/// and the drop landed below its midpoint. If the source comes before the raw
/// destination, removing it shifts the destination left by one.
pub fn compute_destination_index(
    domain_len: usize,
    target_index: usize,
    is_target_last: bool,
    drop_is_below_midpoint: bool,
    src_index: usize,
) -> usize {
    let mut dest = target_index;
    if is_target_last && drop_is_below_midpoint {
        dest += 1;
    }
    if src_index < dest {
        dest -= 1;
    }
    dest.min(domain_len.saturating_sub(1))
}

/// Transient "drop here" indicator on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropMarker {
    pub target: DragItem,
    pub zone: DropZone,
}

/// A move ready to be applied with remove-then-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedMove {
    Section { from: usize, to: usize },
    Link { section: usize, from: usize, to: usize },
}

#[derive(Debug, Default)]
pub struct DragSession {
    source: Option<DragItem>,
    marker: Option<DropMarker>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, source: DragItem) {
        self.source = Some(source);
        self.marker = None;
    }

    pub fn source(&self) -> Option<DragItem> {
        self.source
    }

    pub fn marker(&self) -> Option<DropMarker> {
        self.marker
    }

    /// Updates the drop marker for the hovered target.
    ///
    /// Only targets in the source's domain get a marker; hovering the source itself,
    /// a target of the other kind, or a stale index clears it.
    pub fn hover(
        &mut self,
        collection: &Collection,
        target: DragItem,
        pointer: PointerPosition,
    ) -> Option<DropMarker> {
        self.marker = None;
        let source = self.source?;
        if source == target || !same_kind(source, target) {
            return None;
        }
        let (_, is_last) = target.locate(collection)?;
        let marker = DropMarker {
            target,
            zone: classify_drop_zone(pointer, is_last),
        };
        self.marker = Some(marker);
        Some(marker)
    }

    /// Resolves a drop into a move. The marker is cleared whatever the outcome.
    ///
    /// Returns `None` for every inert drop: no active drag, self-drop, cross-domain or
    /// cross-section drop, stale indexes, or a move that would not change the order.
    pub fn drop(
        &mut self,
        collection: &Collection,
        target: DragItem,
        pointer: PointerPosition,
    ) -> Option<PlannedMove> {
        self.marker = None;
        let source = self.source?;
        if source == target {
            return None;
        }

        source.locate(collection)?;
        let (len, is_last) = target.locate(collection)?;
        let to = compute_destination_index(
            len,
            target.index(),
            is_last,
            pointer.is_below_midpoint(),
            source.index(),
        );

        let planned = match (source, target) {
            (DragItem::Section { index: from }, DragItem::Section { .. }) => {
                PlannedMove::Section { from, to }
            }
            (
                DragItem::Link {
                    section,
                    index: from,
                },
                DragItem::Link {
                    section: target_section,
                    ..
                },
            ) if section == target_section => PlannedMove::Link { section, from, to },
            _ => return None,
        };

        (source.index() != to).then_some(planned)
    }

    /// Drag finished, dropped or cancelled.
    pub fn end(&mut self) {
        self.source = None;
        self.marker = None;
    }
}

fn same_kind(a: DragItem, b: DragItem) -> bool {
    matches!(
        (a, b),
        (DragItem::Section { .. }, DragItem::Section { .. })
            | (DragItem::Link { .. }, DragItem::Link { .. })
    )
}
