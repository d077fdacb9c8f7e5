//! Public catalog: the category → section tree, the selection/search model
//! and the read contract they load through.

pub mod browser;
pub mod error;
pub mod model;
pub mod selection;
pub mod source;
pub mod taxonomy;

pub use browser::{CatalogBrowser, LoadTicket};
pub use error::{CatalogError, Slice};
pub use model::{Category, CategoryId, Entry, Section, SectionId, Tag};
pub use selection::{Scope, Selection};
pub use source::{CatalogSource, HttpCatalogSource, PgCatalogSource};
pub use taxonomy::{CategoryNode, ExpandedCategories, TaxonomyTree, TreeNodeView};
