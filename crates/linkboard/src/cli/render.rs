use super::styles;
use colored::Colorize;
use linkboardapp::commands::{CmdMessage, IndexedSection, MessageLevel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;
const LINK_INDENT: &str = "    ";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_sections(sections: &[IndexedSection]) -> String {
    if sections.is_empty() {
        return "No sections yet. Add one with `linkboard section add <title>`.\n".to_string();
    }
    sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_section(entry: &IndexedSection) -> String {
    let section = &entry.section;
    let mut out = format!(
        "{} {}  {}\n",
        styles::index().apply_to(format!("{}.", entry.index + 1)),
        section.title.color(section.color.as_str()).bold(),
        styles::anchor().apply_to(format!("#{}", section.id)),
    );

    if section.links.is_empty() {
        out.push_str(&format!(
            "{}{}\n",
            LINK_INDENT,
            styles::faint().apply_to("(no links)")
        ));
        return out;
    }

    let name_width = section
        .links
        .iter()
        .map(|l| l.name.width())
        .max()
        .unwrap_or(0)
        .min(NAME_WIDTH);
    let number_width = section.links.len().to_string().len() + 1;

    for (i, link) in section.links.iter().enumerate() {
        let number = format!("{}.", i + 1);
        let name = truncate_to_width(&link.name, name_width);
        let padding = name_width.saturating_sub(name.width());
        out.push_str(&format!(
            "{}{}{} {}{}  {}\n",
            LINK_INDENT,
            " ".repeat(number_width - number.len()),
            styles::index().apply_to(&number),
            name,
            " ".repeat(padding),
            styles::url().apply_to(&link.url),
        ));
    }
    out
}

/// One line per section, for showing the order after a section move.
pub fn render_outline(sections: &[IndexedSection]) -> String {
    let mut out = String::new();
    for entry in sections {
        out.push_str(&format!(
            "{} {}\n",
            styles::index().apply_to(format!("{}.", entry.index + 1)),
            entry.section.title.color(entry.section.color.as_str()),
        ));
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        // Leave room for the ellipsis.
        if current_width + char_width + 1 > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkboardapp::model::{Link, Section};

    fn plain() {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }

    fn entry(index: usize, section: Section) -> IndexedSection {
        IndexedSection { index, section }
    }

    #[test]
    fn section_with_aligned_links() {
        plain();
        let section = Section::new("sec-1", "Work", "cyan").with_links(vec![
            Link::new("Mail", "https://mail.example.com"),
            Link::new("Calendar", "https://cal.example.com"),
        ]);
        let out = render_section(&entry(0, section));
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "1. Work  #sec-1");
        assert_eq!(lines[1], "    1. Mail      https://mail.example.com");
        assert_eq!(lines[2], "    2. Calendar  https://cal.example.com");
    }

    #[test]
    fn empty_section_shows_placeholder() {
        plain();
        let out = render_section(&entry(2, Section::new("sec-x", "Empty", "red")));
        assert!(out.starts_with("3. Empty"));
        assert!(out.contains("(no links)"));
    }

    #[test]
    fn empty_collection_hint() {
        assert!(render_sections(&[]).contains("section add"));
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "x".repeat(40);
        let cut = truncate_to_width(&name, 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn messages_one_per_line() {
        plain();
        let out = render_messages(&[
            CmdMessage::success("Section added: Work"),
            CmdMessage::warning("No section at position 9"),
        ]);
        assert_eq!(out, "Section added: Work\nNo section at position 9\n");
    }
}
