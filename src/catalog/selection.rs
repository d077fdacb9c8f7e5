//! Taxonomy focus plus search text, and the entry predicate derived from them.

use serde::{Deserialize, Serialize};

use super::model::{CategoryId, Entry, SectionId};

/// What the tree currently scopes the grid to.
///
/// A section selection replaces a category selection, so there is no state
/// carrying both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Scope {
    #[default]
    All,
    Category(CategoryId),
    Section(SectionId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    scope: Scope,
    search_query: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from request parameters; a section wins over a category
    pub fn from_params(category: Option<CategoryId>, section: Option<SectionId>, query: Option<String>) -> Self {
        let scope = match (section, category) {
            (Some(s), _) => Scope::Section(s),
            (None, Some(c)) => Scope::Category(c),
            (None, None) => Scope::All,
        };
        Self { scope, search_query: query.unwrap_or_default() }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        match self.scope {
            Scope::Category(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_section(&self) -> Option<SectionId> {
        match self.scope {
            Scope::Section(id) => Some(id),
            _ => None,
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Select a category, or clear everything when it is already selected.
    /// Returns true when the category ends up selected.
    pub fn select_category(&mut self, id: CategoryId) -> bool {
        if self.scope == Scope::Category(id) {
            self.scope = Scope::All;
            false
        } else {
            self.scope = Scope::Category(id);
            true
        }
    }

    /// Select a section, or clear everything when it is already selected.
    /// The parent is known to callers but never stored.
    pub fn select_section(&mut self, id: SectionId, _parent: CategoryId) -> bool {
        if self.scope == Scope::Section(id) {
            self.scope = Scope::All;
            false
        } else {
            self.scope = Scope::Section(id);
            true
        }
    }

    pub fn show_all(&mut self) {
        self.scope = Scope::All;
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.in_scope(entry) && matches_search(entry, &normalize(&self.search_query))
    }

    /// Visible subset, in input order
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let needle = normalize(&self.search_query);
        entries
            .iter()
            .filter(|e| self.in_scope(e) && matches_search(e, &needle))
            .collect()
    }

    fn in_scope(&self, entry: &Entry) -> bool {
        match self.scope {
            Scope::All => true,
            Scope::Category(id) => entry.category_id == id,
            Scope::Section(id) => entry.section_id == Some(id),
        }
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn matches_search(entry: &Entry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(&entry.title) || entry.description.as_deref().map(hit).unwrap_or(false) || hit(&entry.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::entry;
    use uuid::Uuid;

    fn titles(visible: &[&Entry]) -> Vec<String> {
        visible.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn repeat_category_selection_clears() {
        let c = Uuid::new_v4();
        let mut selection = Selection::new();
        assert!(selection.select_category(c));
        assert_eq!(selection.scope(), Scope::Category(c));
        assert!(!selection.select_category(c));
        assert_eq!(selection.scope(), Scope::All);
    }

    #[test]
    fn repeat_section_selection_clears() {
        let (c, s) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.select_section(s, c);
        selection.select_section(s, c);
        assert_eq!(selection.selected_category(), None);
        assert_eq!(selection.selected_section(), None);
    }

    #[test]
    fn section_selection_clears_category() {
        let (c, s) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.select_category(c);
        selection.select_section(s, c);
        assert_eq!(selection.selected_category(), None);
        assert_eq!(selection.selected_section(), Some(s));
    }

    #[test]
    fn category_selection_clears_section() {
        let (c, s) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::new();
        selection.select_section(s, c);
        selection.select_category(c);
        assert_eq!(selection.scope(), Scope::Category(c));
    }

    #[test]
    fn show_all_and_search_are_independent() {
        let c = Uuid::new_v4();
        let mut selection = Selection::new();
        selection.select_category(c);
        selection.set_search_query("gpt");
        assert_eq!(selection.scope(), Scope::Category(c));
        selection.show_all();
        assert_eq!(selection.scope(), Scope::All);
        assert_eq!(selection.search_query(), "gpt");
    }

    #[test]
    fn scope_filter_selects_by_category_section_or_nothing() {
        let (a, b, x) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let entries = vec![
            entry("1", None, "", a, None),
            entry("2", None, "", a, Some(x)),
            entry("3", None, "", b, None),
        ];

        let mut selection = Selection::new();
        assert_eq!(titles(&selection.apply(&entries)), vec!["1", "2", "3"]);

        selection.select_category(a);
        assert_eq!(titles(&selection.apply(&entries)), vec!["1", "2"]);

        selection.select_section(x, a);
        assert_eq!(titles(&selection.apply(&entries)), vec!["2"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_description_content() {
        let c = Uuid::new_v4();
        let e = entry("GPT Prompt", Some(""), "helper", c, None);
        let mut selection = Selection::new();

        for query in ["gpt", "PROMPT", "Help", "  gpt  "] {
            selection.set_search_query(query);
            assert!(selection.matches(&e), "{query} should match");
        }
        selection.set_search_query("xyz");
        assert!(!selection.matches(&e));

        let described = entry("Untitled", Some("Drafting ASSISTANT"), "", c, None);
        selection.set_search_query("assistant");
        assert!(selection.matches(&described));
    }

    #[test]
    fn blank_search_passes_everything() {
        let e = entry("Anything", None, "", Uuid::new_v4(), None);
        let mut selection = Selection::new();
        selection.set_search_query("   ");
        assert!(selection.matches(&e));
    }

    #[test]
    fn scope_and_search_are_conjunctive() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let entries = vec![
            entry("in scope", None, "a helper", a, None),
            entry("other scope", None, "helper too", b, None),
            entry("in scope, no hit", None, "nothing", a, None),
        ];

        let mut selection = Selection::new();
        selection.select_category(a);
        selection.set_search_query("helper");
        assert_eq!(titles(&selection.apply(&entries)), vec!["in scope"]);
    }

    #[test]
    fn params_prefer_section_over_category() {
        let (c, s) = (Uuid::new_v4(), Uuid::new_v4());
        let selection = Selection::from_params(Some(c), Some(s), Some("q".into()));
        assert_eq!(selection.scope(), Scope::Section(s));
        assert_eq!(selection.search_query(), "q");
        assert_eq!(Selection::from_params(None, None, None).scope(), Scope::All);
    }
}
