use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single line of a task's notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,

    /// Set for notes written by this tool; `None` for lines read from Asana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Note {
    /// A line as read back from the remote notes field.
    pub fn existing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created: None,
        }
    }

    /// Build a new note stamped `MM/DD <text> ///<INITIALS>`.
    pub fn compose(text: &str, initials: Option<&str>, now: DateTime<Local>) -> Self {
        let mut line = format!("{} {}", now.format("%m/%d"), text.trim());
        if let Some(initials) = initials.filter(|i| !i.is_empty()) {
            line.push_str(" ///");
            line.push_str(initials);
        }
        Self {
            text: line,
            created: Some(now.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLine {
    Separator,
    Note(Note),
}

/// A task's notes, split into lines.
///
/// The first blank line is the separator between the task description above
/// it and the running log of notes below it. New notes go directly beneath
/// the separator so the most recent note is always read first.
///
/// The notes text is kept verbatim; inserting a note splices one line into it
/// and leaves every other byte (line endings, trailing newline, whitespace on
/// blank lines) as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NoteList {
    raw: String,
    lines: Vec<NoteLine>,
}

impl NoteList {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    NoteLine::Separator
                } else {
                    NoteLine::Note(Note::existing(line))
                }
            })
            .collect();
        Self {
            raw: text.to_string(),
            lines,
        }
    }

    pub fn lines(&self) -> &[NoteLine] {
        &self.lines
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.lines.iter().filter_map(|line| match line {
            NoteLine::Note(note) => Some(note),
            NoteLine::Separator => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn separator_index(&self) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| matches!(line, NoteLine::Separator))
    }

    /// Insert `note` right after the separator and return its index.
    ///
    /// Without a separator the note goes to the top of the list. The new
    /// line uses the line ending found around the insertion point.
    pub fn insert(&mut self, note: Note) -> usize {
        let (index, offset, ending) = self.insertion_point();

        let mut line = String::new();
        if offset == self.raw.len() && !self.raw.is_empty() && !self.raw.ends_with('\n') {
            // Blank last line without a terminator
            line.push_str(ending);
        }
        line.push_str(&note.text);
        if offset < self.raw.len() {
            line.push_str(ending);
        }

        let mut raw = std::mem::take(&mut self.raw);
        raw.insert_str(offset, &line);
        *self = Self::parse(&raw);
        index
    }

    /// Line index, byte offset and line ending for the next inserted note.
    fn insertion_point(&self) -> (usize, usize, &'static str) {
        let mut offset = 0;
        for (i, segment) in self.raw.split_inclusive('\n').enumerate() {
            offset += segment.len();
            if segment.trim().is_empty() {
                return (i + 1, offset, line_ending(segment));
            }
        }
        let first = self.raw.split_inclusive('\n').next().unwrap_or_default();
        (0, 0, line_ending(first))
    }

    /// The notes exactly as Asana stores them.
    pub fn render(&self) -> String {
        self.raw.clone()
    }
}

fn line_ending(segment: &str) -> &'static str {
    if segment.ends_with("\r\n") { "\r\n" } else { "\n" }
}

impl From<String> for NoteList {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<NoteList> for String {
    fn from(notes: NoteList) -> Self {
        notes.raw
    }
}

impl fmt::Display for NoteList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, month, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_parse_and_render_preserve_text() {
        let text = "Intake call done\nParent prefers mornings\n\n03/02 left voicemail ///AB";
        let notes = NoteList::parse(text);
        assert_eq!(notes.lines().len(), 4);
        assert_eq!(notes.separator_index(), Some(2));
        assert_eq!(notes.render(), text);
    }

    #[test]
    fn test_insert_goes_right_after_separator() {
        let mut notes = NoteList::parse("Header\n\nolder note\noldest note");
        let index = notes.insert(Note::existing("hello"));

        assert_eq!(index, 2);
        assert_eq!(notes.render(), "Header\n\nhello\nolder note\noldest note");
    }

    #[test]
    fn test_insert_uses_first_blank_line_only() {
        let mut notes = NoteList::parse("a\n\nb\n\nc");
        notes.insert(Note::existing("new"));
        assert_eq!(notes.render(), "a\n\nnew\nb\n\nc");
    }

    #[test]
    fn test_insert_without_separator_goes_to_top() {
        let mut notes = NoteList::parse("first\nsecond");
        assert_eq!(notes.separator_index(), None);
        notes.insert(Note::existing("new"));
        assert_eq!(notes.render(), "new\nfirst\nsecond");
    }

    #[test]
    fn test_insert_into_empty_list() {
        let mut notes = NoteList::parse("");
        assert!(notes.is_empty());
        notes.insert(Note::existing("only"));
        assert_eq!(notes.render(), "only");
    }

    #[test]
    fn test_whitespace_only_line_is_separator() {
        let notes = NoteList::parse("top\n   \nbottom");
        assert_eq!(notes.separator_index(), Some(1));
        assert_eq!(notes.notes().count(), 2);
    }

    #[test]
    fn test_compose_stamps_date_and_initials() {
        let note = Note::compose("  called parent ", Some("AB"), at(3, 7));
        assert_eq!(note.text, "03/07 called parent ///AB");
        assert!(note.created.is_some());
    }

    #[test]
    fn test_compose_without_initials() {
        let note = Note::compose("hello", None, at(12, 25));
        assert_eq!(note.text, "12/25 hello");

        let note = Note::compose("hello", Some(""), at(12, 25));
        assert_eq!(note.text, "12/25 hello");
    }

    #[test]
    fn test_insert_keeps_crlf_and_trailing_newline() {
        let mut notes = NoteList::parse("desc\r\n\r\nolder\n");
        assert_eq!(notes.render(), "desc\r\n\r\nolder\n");

        notes.insert(Note::existing("new"));
        assert_eq!(notes.render(), "desc\r\n\r\nnew\r\nolder\n");
    }

    #[test]
    fn test_insert_keeps_whitespace_on_separator() {
        let mut notes = NoteList::parse("desc\n  \nolder");
        notes.insert(Note::existing("new"));
        assert_eq!(notes.render(), "desc\n  \nnew\nolder");
        assert_eq!(notes.separator_index(), Some(1));
    }

    #[test]
    fn test_insert_after_trailing_blank_line() {
        let mut notes = NoteList::parse("desc\n\n");
        assert_eq!(notes.insert(Note::existing("new")), 2);
        assert_eq!(notes.render(), "desc\n\nnew");

        let mut notes = NoteList::parse("desc\n   ");
        notes.insert(Note::existing("new"));
        assert_eq!(notes.render(), "desc\n   \nnew");
    }

    #[test]
    fn test_serializes_as_raw_text() {
        let notes = NoteList::parse("a\r\n\r\nb");
        let json = serde_json::to_string(&notes).unwrap();
        assert_eq!(json, r#""a\r\n\r\nb""#);
        let back: NoteList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notes);
    }
}
