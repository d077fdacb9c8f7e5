//! Category → section tree with per-mount expansion state.

use std::collections::HashSet;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, error};

use super::error::CatalogError;
use super::model::{Category, CategoryId, Section, SectionId};
use super::source::CatalogSource;

/// Category ids currently shown expanded. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedCategories(HashSet<CategoryId>);

impl ExpandedCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id was not already present
    pub fn insert(&mut self, id: CategoryId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &CategoryId) -> bool {
        self.0.remove(id)
    }

    /// Flip membership; returns the new membership
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One category with its active sections in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    pub category: Category,
    pub sections: Vec<Section>,
}

impl CategoryNode {
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// Serialized form of one tree row; `expanded` is true only when the
/// node actually renders its sections
#[derive(Debug, Serialize)]
pub struct TreeNodeView<'a> {
    #[serde(flatten)]
    pub node: &'a CategoryNode,
    pub expanded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyTree {
    nodes: Vec<CategoryNode>,
    expanded: ExpandedCategories,
    load_error: Option<CatalogError>,
}

impl TaxonomyTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<CategoryNode>) -> Self {
        Self { nodes, ..Default::default() }
    }

    /// Load the forest from `source`.
    ///
    /// Never fails: a read error yields an empty tree and the error is kept
    /// in `load_error()` for the caller. Sections are filtered by their own
    /// active flag, independent of the parent category's.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match Self::fetch_nodes(source).await {
            Ok(nodes) => {
                debug!(categories = nodes.len(), "Loaded taxonomy tree");
                Self::from_nodes(nodes)
            }
            Err(e) => {
                error!(slice = %e.slice(), "Taxonomy load failed: {}", e);
                Self { load_error: Some(e), ..Default::default() }
            }
        }
    }

    async fn fetch_nodes(source: &dyn CatalogSource) -> Result<Vec<CategoryNode>, CatalogError> {
        let categories = source.fetch_categories().await?;
        let sections = try_join_all(categories.iter().map(|c| source.fetch_sections(c.id))).await?;

        Ok(categories
            .into_iter()
            .zip(sections)
            .map(|(category, sections)| CategoryNode { category, sections })
            .collect())
    }

    pub fn nodes(&self) -> &[CategoryNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn load_error(&self) -> Option<&CatalogError> {
        self.load_error.as_ref()
    }

    pub fn expanded(&self) -> &ExpandedCategories {
        &self.expanded
    }

    /// Unknown ids are accepted; they simply never match a node
    pub fn toggle_expanded(&mut self, id: CategoryId) -> bool {
        self.expanded.toggle(id)
    }

    pub fn expand(&mut self, id: CategoryId) {
        self.expanded.insert(id);
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    /// A node renders its children only when expanded and non-empty
    pub fn shows_sections(&self, id: &CategoryId) -> bool {
        self.is_expanded(id) && self.node(id).map(CategoryNode::has_sections).unwrap_or(false)
    }

    pub fn views(&self) -> Vec<TreeNodeView<'_>> {
        self.nodes
            .iter()
            .map(|node| TreeNodeView { node, expanded: self.shows_sections(&node.category.id) })
            .collect()
    }

    pub fn node(&self, id: &CategoryId) -> Option<&CategoryNode> {
        self.nodes.iter().find(|n| &n.category.id == id)
    }

    /// Owning category of a section present in the tree
    pub fn parent_of(&self, section: &SectionId) -> Option<CategoryId> {
        self.nodes
            .iter()
            .find(|n| n.sections.iter().any(|s| &s.id == section))
            .map(|n| n.category.id)
    }

    /// Swap in a freshly loaded forest, keeping the expansion set
    pub fn replace_forest(&mut self, loaded: TaxonomyTree) {
        self.nodes = loaded.nodes;
        self.load_error = loaded.load_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::Slice;
    use crate::testing::{category, section, MemorySource};
    use uuid::Uuid;

    #[test]
    fn toggle_flips_membership() {
        let mut expanded = ExpandedCategories::new();
        let id = Uuid::new_v4();
        assert!(expanded.toggle(id));
        assert!(expanded.contains(&id));
        assert!(!expanded.toggle(id));
        assert!(expanded.is_empty());
    }

    #[test]
    fn toggling_unknown_ids_is_harmless() {
        let mut tree = TaxonomyTree::empty();
        let ghost = Uuid::new_v4();
        assert!(tree.toggle_expanded(ghost));
        assert!(tree.is_expanded(&ghost));
        assert!(!tree.shows_sections(&ghost));
        assert!(!tree.toggle_expanded(ghost));
        assert!(!tree.is_expanded(&ghost));
    }

    #[tokio::test]
    async fn load_groups_sections_under_categories_in_order() {
        let tools = category("Tools", 2);
        let prompts = category("Prompts", 1);
        let writing = section(prompts.id, "Writing", 2);
        let coding = section(prompts.id, "Coding", 1);
        let cli = section(tools.id, "CLI", 1);

        let source = MemorySource::new()
            .with_categories(vec![tools.clone(), prompts.clone()])
            .with_sections(vec![writing.clone(), cli.clone(), coding.clone()]);

        let tree = TaxonomyTree::load(&source).await;
        assert!(tree.load_error().is_none());

        let names: Vec<_> = tree.nodes().iter().map(|n| n.category.name.as_str()).collect();
        assert_eq!(names, vec!["Prompts", "Tools"]);

        let prompt_sections: Vec<_> = tree.nodes()[0].sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(prompt_sections, vec!["Coding", "Writing"]);
        assert_eq!(tree.parent_of(&cli.id), Some(tools.id));
    }

    #[tokio::test]
    async fn active_flags_filter_each_level_independently() {
        let mut hidden = category("Hidden", 0);
        hidden.is_active = false;
        let shown = category("Shown", 1);
        let mut retired = section(shown.id, "Retired", 0);
        retired.is_active = false;
        let live = section(shown.id, "Live", 1);
        let orphan = section(hidden.id, "Orphan", 0);

        let source = MemorySource::new()
            .with_categories(vec![hidden, shown.clone()])
            .with_sections(vec![retired, live.clone(), orphan.clone()]);

        let tree = TaxonomyTree::load(&source).await;
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].sections, vec![live]);

        // the section is still active on its own level
        let sections = source.fetch_sections(orphan.category_id).await.unwrap();
        assert_eq!(sections, vec![orphan]);
    }

    #[tokio::test]
    async fn failing_categories_read_yields_empty_tree() {
        let source = MemorySource::new()
            .with_categories(vec![category("Prompts", 0)])
            .failing(Slice::Categories);

        let tree = TaxonomyTree::load(&source).await;
        assert!(tree.is_empty());
        assert_eq!(tree.load_error().map(CatalogError::slice), Some(Slice::Categories));
    }

    #[tokio::test]
    async fn failing_sections_read_yields_empty_tree() {
        let prompts = category("Prompts", 0);
        let source = MemorySource::new()
            .with_categories(vec![prompts.clone()])
            .with_sections(vec![section(prompts.id, "Coding", 0)])
            .failing(Slice::Sections);

        let tree = TaxonomyTree::load(&source).await;
        assert!(tree.is_empty());
        assert_eq!(tree.load_error().map(CatalogError::slice), Some(Slice::Sections));
    }

    #[test]
    fn leaf_categories_never_show_children() {
        let leaf = category("Leaf", 0);
        let branch = category("Branch", 1);
        let mut tree = TaxonomyTree::from_nodes(vec![
            CategoryNode { category: leaf.clone(), sections: vec![] },
            CategoryNode { category: branch.clone(), sections: vec![section(branch.id, "Child", 0)] },
        ]);

        tree.expand(leaf.id);
        tree.expand(branch.id);
        assert!(tree.is_expanded(&leaf.id));
        assert!(!tree.shows_sections(&leaf.id));
        assert!(tree.shows_sections(&branch.id));
    }

    #[test]
    fn replacing_the_forest_keeps_expansion() {
        let prompts = category("Prompts", 0);
        let mut tree = TaxonomyTree::empty();
        tree.expand(prompts.id);

        tree.replace_forest(TaxonomyTree::from_nodes(vec![CategoryNode {
            category: prompts.clone(),
            sections: vec![section(prompts.id, "Coding", 0)],
        }]));
        assert!(tree.shows_sections(&prompts.id));
    }

    #[test]
    fn views_report_expanded_only_for_rendered_children() {
        let prompts = category("Prompts", 0);
        let tools = category("Tools", 1);
        let coding = section(prompts.id, "Coding", 0);
        let mut tree = TaxonomyTree::from_nodes(vec![
            CategoryNode { category: prompts.clone(), sections: vec![coding] },
            CategoryNode { category: tools.clone(), sections: vec![] },
        ]);
        tree.expand(prompts.id);
        tree.expand(tools.id);

        let views = tree.views();
        assert!(views[0].expanded);
        assert!(!views[1].expanded);

        let json = serde_json::to_value(&views[1]).unwrap();
        assert_eq!(json["expanded"], false);
        assert_eq!(json["category"]["name"], "Tools");
    }
}
