use crate::commands::{no_link, no_section, CmdMessage, CmdResult, IndexedSection};
use crate::model::{Collection, Link};

pub fn add(collection: &mut Collection, section: usize, name: String, url: String) -> CmdResult {
    let link = Link::new(name, url);
    let message = format!("Link added: {}", link.name);
    if !collection.push_link(section, link) {
        return no_section(section);
    }
    CmdResult::changed()
        .with_affected(IndexedSection::at(collection, section).into_iter().collect())
        .with_message(CmdMessage::success(message))
}

/// Replaces the link at `index` wholesale.
pub fn edit(
    collection: &mut Collection,
    section: usize,
    index: usize,
    name: String,
    url: String,
) -> CmdResult {
    if collection.section(section).is_none() {
        return no_section(section);
    }
    match collection.replace_link(section, index, Link::new(name, url)) {
        Some(old) => CmdResult::changed()
            .with_affected(IndexedSection::at(collection, section).into_iter().collect())
            .with_message(CmdMessage::success(format!("Link updated: {}", old.name))),
        None => no_link(section, index),
    }
}

pub fn delete(collection: &mut Collection, section: usize, index: usize) -> CmdResult {
    if collection.section(section).is_none() {
        return no_section(section);
    }
    match collection.remove_link(section, index) {
        Some(old) => CmdResult::changed()
            .with_affected(IndexedSection::at(collection, section).into_iter().collect())
            .with_message(CmdMessage::success(format!("Link deleted: {}", old.name))),
        None => no_link(section, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn work() -> Collection {
        Collection::from(vec![
            Section::new("a", "Work", "cyan").with_links(vec![Link::new("X", "http://x")])
        ])
    }

    fn names(c: &Collection, section: usize) -> Vec<&str> {
        c.section(section)
            .unwrap()
            .links
            .iter()
            .map(|l| l.name.as_str())
            .collect()
    }

    #[test]
    fn add_appends_to_the_section() {
        let mut c = work();
        let result = add(&mut c, 0, "Y".into(), "http://y".into());
        assert!(result.changed);
        assert_eq!(names(&c, 0), vec!["X", "Y"]);
    }

    #[test]
    fn add_to_section_read_without_links() {
        let mut c = Collection::from_snapshot(r#"[{"id":"a","title":"Bare"}]"#).unwrap();
        add(&mut c, 0, "Y".into(), "http://y".into());
        assert_eq!(names(&c, 0), vec!["Y"]);
    }

    #[test]
    fn add_to_missing_section_is_noop() {
        let mut c = work();
        let result = add(&mut c, 1, "Y".into(), "http://y".into());
        assert!(!result.changed);
        assert_eq!(c, work());
    }

    #[test]
    fn edit_replaces_name_and_url() {
        let mut c = work();
        let result = edit(&mut c, 0, 0, "Z".into(), "http://z".into());
        assert!(result.changed);
        assert_eq!(c.section(0).unwrap().links[0], Link::new("Z", "http://z"));
    }

    #[test]
    fn edit_missing_link_is_noop() {
        let mut c = work();
        let result = edit(&mut c, 0, 4, "Z".into(), "http://z".into());
        assert!(!result.changed);
        assert!(result.messages[0]
            .content
            .contains("No link at position 5 in section 1"));
        assert_eq!(c, work());
    }

    #[test]
    fn delete_removes_by_position_among_duplicates() {
        let mut c = work();
        add(&mut c, 0, "X".into(), "http://x".into());
        add(&mut c, 0, "W".into(), "http://w".into());
        delete(&mut c, 0, 1);
        assert_eq!(names(&c, 0), vec!["X", "W"]);
    }

    #[test]
    fn delete_missing_section_is_noop() {
        let mut c = work();
        let result = delete(&mut c, 2, 0);
        assert!(!result.changed);
        assert_eq!(c, work());
    }
}
