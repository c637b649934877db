//! Applies moves. `dest` is always the post-removal index, as produced by
//! [`crate::reorder::compute_destination_index`].

use crate::commands::{no_section, CmdMessage, CmdResult, IndexedSection};
use crate::model::Collection;
use crate::reorder::PlannedMove;

pub fn move_section(collection: &mut Collection, src: usize, dest: usize) -> CmdResult {
    if !collection.move_section(src, dest) {
        return CmdResult::noop(format!(
            "Section {} cannot move to position {}",
            src + 1,
            dest + 1
        ));
    }
    let affected: Vec<_> = IndexedSection::at(collection, dest).into_iter().collect();
    let title = affected
        .first()
        .map(|s| s.section.title.clone())
        .unwrap_or_default();
    CmdResult::changed()
        .with_affected(affected)
        .with_message(CmdMessage::success(format!(
            "Moved section {} to position {}",
            title,
            dest + 1
        )))
}

pub fn move_link(collection: &mut Collection, section: usize, src: usize, dest: usize) -> CmdResult {
    if collection.section(section).is_none() {
        return no_section(section);
    }
    if !collection.move_link(section, src, dest) {
        return CmdResult::noop(format!(
            "Link {} cannot move to position {} in section {}",
            src + 1,
            dest + 1,
            section + 1
        ));
    }
    let affected: Vec<_> = IndexedSection::at(collection, section)
        .into_iter()
        .collect();
    let name = affected
        .first()
        .and_then(|s| s.section.links.get(dest))
        .map(|l| l.name.clone())
        .unwrap_or_default();
    CmdResult::changed()
        .with_affected(affected)
        .with_message(CmdMessage::success(format!(
            "Moved link {} to position {}",
            name,
            dest + 1
        )))
}

pub fn apply(collection: &mut Collection, planned: PlannedMove) -> CmdResult {
    match planned {
        PlannedMove::Section { from, to } => move_section(collection, from, to),
        PlannedMove::Link { section, from, to } => move_link(collection, section, from, to),
    }
}
