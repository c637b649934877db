use crate::commands::{no_section, CmdMessage, CmdResult, IndexedSection};
use crate::model::{Collection, Section};

/// Appends a new, empty section with a fresh id.
pub fn add(collection: &mut Collection, title: String, color: &str) -> CmdResult {
    let section = Section::new(collection.fresh_section_id(), title, color);
    collection.push_section(section);
    let index = collection.len() - 1;

    let affected: Vec<_> = IndexedSection::at(collection, index).into_iter().collect();
    let title = affected
        .first()
        .map(|s| s.section.title.clone())
        .unwrap_or_default();
    CmdResult::changed()
        .with_affected(affected)
        .with_message(CmdMessage::success(format!("Section added: {}", title)))
}

pub fn rename(collection: &mut Collection, index: usize, title: String) -> CmdResult {
    let Some(section) = collection.section_mut(index) else {
        return no_section(index);
    };
    let old = std::mem::replace(&mut section.title, title);
    let new = section.title.clone();

    CmdResult::changed()
        .with_affected(IndexedSection::at(collection, index).into_iter().collect())
        .with_message(CmdMessage::success(format!(
            "Section renamed: {} -> {}",
            old, new
        )))
}

pub fn delete(collection: &mut Collection, index: usize) -> CmdResult {
    match collection.remove_section(index) {
        Some(section) => CmdResult::changed()
            .with_affected(vec![IndexedSection { index, section }])
            .with_message(CmdMessage::success("Section deleted")),
        None => no_section(index),
    }
}
