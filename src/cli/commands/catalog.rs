use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::catalog::{CatalogBrowser, CatalogSource, HttpCatalogSource, Scope, Selection, TaxonomyTree};
use crate::cli::utils::print_json;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CatalogCommands {
    #[command(about = "Print the category and section tree")]
    Tree {
        #[arg(long, value_name = "ID", help = "Expand a category (repeatable)")]
        expand: Vec<Uuid>,
        #[arg(long, help = "Expand every category")]
        expand_all: bool,
        #[arg(long, help = "Mark a category as selected and expand it")]
        category: Option<Uuid>,
        #[arg(long, help = "Mark a section as selected", conflicts_with = "category")]
        section: Option<Uuid>,
    },

    #[command(about = "List published entries matching a scope and search text")]
    Entries {
        #[arg(long, help = "Only entries in this category")]
        category: Option<Uuid>,
        #[arg(long, help = "Only entries in this section (wins over --category)")]
        section: Option<Uuid>,
        #[arg(long, short, help = "Case-insensitive text over title, description and content")]
        search: Option<String>,
        #[arg(long, default_value_t = 50, help = "How many recent entries to fetch")]
        limit: i32,
    },
}

pub async fn handle(cmd: CatalogCommands, api_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let source = HttpCatalogSource::new(api_url);
    let mut browser = CatalogBrowser::new();

    match cmd {
        CatalogCommands::Tree { expand, expand_all, category, section } => {
            load_tree_only(&mut browser, &source).await;
            warn_on_failures(&browser);
            let mut ids = expand;
            if expand_all {
                ids.extend(browser.tree().nodes().iter().map(|n| n.category.id));
            }
            for id in ids {
                if !browser.tree().is_expanded(&id) {
                    browser.toggle_expanded(id);
                }
            }
            browser.focus(&Selection::from_params(category, section, None));

            match output_format {
                OutputFormat::Json => print_json(&tree_json(&browser))?,
                OutputFormat::Text => {
                    for line in render_tree(browser.tree(), browser.selection()) {
                        println!("{}", line);
                    }
                }
            }
        }
        CatalogCommands::Entries { category, section, search, limit } => {
            browser.load(&source, limit).await;
            warn_on_failures(&browser);
            browser.focus(&Selection::from_params(category, section, search));

            let visible = browser.visible_entries();
            match output_format {
                OutputFormat::Json => print_json(&json!({ "entries": visible, "total": visible.len() }))?,
                OutputFormat::Text => {
                    if visible.is_empty() {
                        println!("No entries found");
                    }
                    for entry in &visible {
                        println!("{}  [{}]  {}", entry.id, entry.content_type, entry.title);
                    }
                }
            }
        }
    }

    browser.unmount();
    Ok(())
}

/// The tree command never shows entries, so it skips fetching them
async fn load_tree_only(browser: &mut CatalogBrowser, source: &dyn CatalogSource) {
    let ticket = browser.begin_load();
    browser.finish_tree(ticket, TaxonomyTree::load(source).await);
}

fn tree_json(browser: &CatalogBrowser) -> serde_json::Value {
    json!({ "tree": browser.tree().views(), "selection": browser.selection() })
}

fn warn_on_failures(browser: &CatalogBrowser) {
    if let Some(e) = browser.tree().load_error() {
        eprintln!("warning: {}", e);
    }
    if let Some(e) = browser.entries_error() {
        eprintln!("warning: {}", e);
    }
}

/// Text rendering of the navigation tree. `*` marks the selected row;
/// `v` an expanded category with sections, `>` a collapsed one.
pub fn render_tree(tree: &TaxonomyTree, selection: &Selection) -> Vec<String> {
    let mark = |selected: bool| if selected { '*' } else { ' ' };
    let scope = selection.scope();

    let mut lines = vec![format!("{} All", mark(scope == Scope::All))];
    for node in tree.nodes() {
        let id = node.category.id;
        let arrow = match (node.has_sections(), tree.shows_sections(&id)) {
            (false, _) => ' ',
            (true, true) => 'v',
            (true, false) => '>',
        };
        lines.push(format!("{} {} {}", mark(scope == Scope::Category(id)), arrow, node.category.name));

        if tree.shows_sections(&id) {
            for section in &node.sections {
                lines.push(format!("    {} {}", mark(scope == Scope::Section(section.id)), section.name));
            }
        }
    }
    lines
}
