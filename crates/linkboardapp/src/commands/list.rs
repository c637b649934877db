use crate::commands::{CmdResult, IndexedSection};
use crate::model::Collection;

pub fn run(collection: &Collection) -> CmdResult {
    let listed = collection
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| IndexedSection {
            index,
            section: section.clone(),
        })
        .collect();
    CmdResult::default().with_listed(listed)
}

/// Looks a section up by its id.
pub fn find(collection: &Collection, id: &str) -> CmdResult {
    match collection.position_of(id) {
        Some(index) => CmdResult::default()
            .with_listed(IndexedSection::at(collection, index).into_iter().collect()),
        None => CmdResult::noop(format!("No section with id {}", id)),
    }
}
