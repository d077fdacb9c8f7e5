//! Tree, selection and entry snapshot as one mounted view.

use tracing::{debug, error};

use super::error::CatalogError;
use super::model::{CategoryId, Entry, SectionId};
use super::selection::{Scope, Selection};
use super::source::CatalogSource;
use super::taxonomy::TaxonomyTree;

/// Issued when a load starts; results carrying an older ticket are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct CatalogBrowser {
    tree: TaxonomyTree,
    selection: Selection,
    entries: Vec<Entry>,
    entries_error: Option<CatalogError>,
    generation: u64,
    unmounted: bool,
}

impl CatalogBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tree and entries in one pass
    pub async fn load(&mut self, source: &dyn CatalogSource, limit: i32) {
        let ticket = self.begin_load();
        let (tree, entries) = futures::join!(TaxonomyTree::load(source), source.fetch_entries(limit));
        self.finish_tree(ticket, tree);
        self.finish_entries(ticket, entries);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    fn is_live(&self, ticket: LoadTicket) -> bool {
        !self.unmounted && ticket.0 == self.generation
    }

    /// Returns false when the result was discarded
    pub fn finish_tree(&mut self, ticket: LoadTicket, tree: TaxonomyTree) -> bool {
        if !self.is_live(ticket) {
            debug!(ticket = ticket.0, "Discarding stale taxonomy result");
            return false;
        }
        self.tree.replace_forest(tree);
        true
    }

    /// Returns false when the result was discarded. A failure degrades to
    /// an empty entry list.
    pub fn finish_entries(&mut self, ticket: LoadTicket, result: Result<Vec<Entry>, CatalogError>) -> bool {
        if !self.is_live(ticket) {
            debug!(ticket = ticket.0, "Discarding stale entries result");
            return false;
        }
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.entries_error = None;
            }
            Err(e) => {
                error!("Entries load failed: {}", e);
                self.entries.clear();
                self.entries_error = Some(e);
            }
        }
        true
    }

    /// Late results after this point are ignored
    pub fn unmount(&mut self) {
        if !self.unmounted {
            debug!(generation = self.generation, "Catalog view unmounted");
        }
        self.unmounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted
    }

    /// Selecting a category also expands its node
    pub fn select_category(&mut self, id: CategoryId) {
        if self.selection.select_category(id) {
            self.tree.expand(id);
        }
    }

    pub fn select_section(&mut self, id: SectionId, parent: CategoryId) {
        self.selection.select_section(id, parent);
    }

    pub fn show_all(&mut self) {
        self.selection.show_all();
    }

    /// Adopt a selection built elsewhere (request parameters, CLI flags)
    /// through the same transitions a user would make, so a chosen
    /// category ends up expanded.
    pub fn focus(&mut self, wanted: &Selection) {
        self.selection.show_all();
        match wanted.scope() {
            Scope::All => {}
            Scope::Category(id) => self.select_category(id),
            Scope::Section(id) => {
                let parent = self.tree.parent_of(&id).unwrap_or_default();
                self.select_section(id, parent);
            }
        }
        self.set_search_query(wanted.search_query());
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.selection.set_search_query(text);
    }

    pub fn toggle_expanded(&mut self, id: CategoryId) -> bool {
        self.tree.toggle_expanded(id)
    }

    pub fn visible_entries(&self) -> Vec<&Entry> {
        self.selection.apply(&self.entries)
    }

    pub fn tree(&self) -> &TaxonomyTree {
        &self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_error(&self) -> Option<&CatalogError> {
        self.entries_error.as_ref()
    }
}
