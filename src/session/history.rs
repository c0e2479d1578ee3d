//! Command-history navigation: an ordered list of submitted lines, a cursor,
//! and a draft buffer for the line being composed.
/// Navigator over previously submitted command strings.
///
/// `cursor == entries.len()` is the "beyond end" position: the user is
/// composing a fresh line. Leaving beyond-end snapshots the composition into
/// `draft`; returning restores it. Neither direction wraps.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Vec<String>,
    cursor: usize,
    draft: String,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted line. Re-submitting the current tail verbatim does
    /// not append a duplicate. Resets the cursor to beyond-end and clears the
    /// draft. Callers reject empty submissions before this point.
    pub fn commit(&mut self, text: &str) {
        if self.entries.last().map(String::as_str) != Some(text) {
            self.entries.push(text.to_string());
        }
        self.cursor = self.entries.len();
        self.draft.clear();
    }

    /// Steps the cursor toward older entries and returns the recalled line,
    /// or `None` when already at the oldest. `current` is the composition in
    /// the input buffer; it is saved as the draft when leaving beyond-end.
    pub fn recall_previous(&mut self, current: &str) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.draft = current.to_string();
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].as_str())
    }

    /// Steps the cursor toward newer entries. Returns the recalled line, or
    /// the saved draft once the cursor moves past the newest entry. At
    /// beyond-end the cursor stays put and the draft is restored.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor == self.entries.len() {
            return Some(self.draft.as_str());
        }
        self.cursor += 1;
        if self.cursor < self.entries.len() {
            Some(self.entries[self.cursor].as_str())
        } else {
            Some(self.draft.as_str())
        }
    }

    /// True while the cursor points into history rather than at beyond-end.
    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_appends_and_resets_cursor() {
        let mut nav = HistoryNavigator::new();
        nav.commit("a");
        nav.commit("b");
        assert_eq!(nav.len(), 2);
        assert!(!nav.is_browsing());
    }

    #[test]
    fn consecutive_duplicate_is_not_appended() {
        let mut nav = HistoryNavigator::new();
        nav.commit("a");
        nav.commit("a");
        assert_eq!(nav.len(), 1);

        // Non-consecutive repeats are kept.
        nav.commit("b");
        nav.commit("a");
        assert_eq!(nav.len(), 3);
    }

    #[test]
    fn recall_walks_back_then_forward() {
        let mut nav = HistoryNavigator::new();
        nav.commit("a");
        nav.commit("b");

        assert_eq!(nav.recall_previous("draft"), Some("b"));
        assert_eq!(nav.recall_previous("unused"), Some("a"));
        // At the oldest entry: no wrap, no-op.
        assert_eq!(nav.recall_previous("unused"), None);

        assert_eq!(nav.recall_next(), Some("b"));
        // Past the newest entry the draft comes back.
        assert_eq!(nav.recall_next(), Some("draft"));
        assert!(!nav.is_browsing());
    }

    #[test]
    fn recall_next_at_beyond_end_restores_draft_without_moving() {
        let mut nav = HistoryNavigator::new();
        nav.commit("a");
        assert_eq!(nav.recall_previous("half-typed"), Some("a"));
        assert_eq!(nav.recall_next(), Some("half-typed"));
        // Still at beyond-end; repeating just restores the draft again.
        assert_eq!(nav.recall_next(), Some("half-typed"));
    }

    #[test]
    fn recall_previous_on_empty_history_is_a_noop() {
        let mut nav = HistoryNavigator::new();
        assert_eq!(nav.recall_previous("typing"), None);
        assert!(!nav.is_browsing());
    }

    #[test]
    fn round_trip_restores_the_composition() {
        let mut nav = HistoryNavigator::new();
        nav.commit("one");
        nav.commit("two");
        nav.commit("three");

        let n = 3;
        for _ in 0..n {
            nav.recall_previous("work in progress");
        }
        let mut last = None;
        for _ in 0..n {
            last = nav.recall_next().map(str::to_string);
        }
        assert_eq!(last.as_deref(), Some("work in progress"));
    }

    #[test]
    fn commit_clears_the_draft() {
        let mut nav = HistoryNavigator::new();
        nav.commit("a");
        nav.recall_previous("stale draft");
        nav.commit("b");
        assert_eq!(nav.recall_next(), Some(""));
    }
}
