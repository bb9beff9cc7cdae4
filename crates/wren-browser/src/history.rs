//! Session history.
//!
//! [§ 7.4 Session history](https://html.spec.whatwg.org/multipage/document-sequences.html#session-history)
//!
//! Entries hold the parsed DOM, so going back re-renders without re-fetching.

use std::rc::Rc;

use wren_dom::DomTree;

/// One visited document.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The parsed document, shared with the page currently on screen.
    pub dom: Rc<DomTree>,
    /// Base URL used to resolve links and images, if any.
    pub base_url: Option<String>,
}

/// A linear history with a cursor.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// [§ 7.4.6.2](https://html.spec.whatwg.org/multipage/browsing-the-web.html#navigate)
    ///
    /// STEP 1: Drop every entry after the current one.
    /// STEP 2: Append the new entry and make it current.
    pub fn push(&mut self, dom: Rc<DomTree>, base_url: Option<String>) {
        // STEP 1
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);

        // STEP 2
        self.entries.push(HistoryEntry { dom, base_url });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry. `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Step forward one entry. `None` when already at the newest entry.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())?;
        self.cursor = Some(cursor + 1);
        self.current()
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor?)
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Index of the current entry.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether [`History::back`] would move.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Whether [`History::forward`] would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }
}
