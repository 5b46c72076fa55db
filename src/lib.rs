pub mod cells;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod edges;
pub mod error;
pub mod extract;
pub mod ir;
pub mod layout;
pub mod theme;
pub mod tree;
pub mod validate;

pub use cells::{Cell, CellIdMode, EdgeCell, NodeCell};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::{Error, Result, ValidationError};
pub use extract::parse_document;
pub use ir::{Component, ComponentKind, Document, Flow};
pub use layout::compute_layout;
pub use theme::Theme;
pub use validate::validate;

use log::info;

/// Lays out a component/flow document and returns the flat cell list:
/// boundaries, then leaf nodes, then edges.
///
/// Pure and deterministic: identical input and configuration always produce
/// an identical cell list.
pub fn build_cells(doc: &Document, config: &LayoutConfig, theme: &Theme) -> Result<Vec<Cell>> {
    let graph = validate::validate(doc, config.cell_ids)?;
    let forest = tree::Forest::build(&graph);
    let layout = layout::compute_layout(&graph, &forest, theme, config);

    let max_boundary_depth = forest
        .preorder()
        .iter()
        .filter(|&&idx| graph.component(idx).kind.is_container())
        .map(|&idx| forest.node(idx).depth)
        .max()
        .unwrap_or(0);
    let bands = theme::ZBands::new(config, max_boundary_depth);

    let mut cells =
        cells::build_node_cells(&graph, &forest, &layout, theme, &bands, config.cell_ids);
    cells.extend(edges::build_edges(&graph, theme, &bands, config.cell_ids));

    info!(
        components = doc.components.len(),
        flows = doc.flows.len(),
        cells = cells.len();
        "built diagram cells"
    );
    Ok(cells)
}

/// Decodes extractor output (plain, fenced or embedded JSON) and lays it out.
pub fn build_cells_from_str(text: &str, config: &LayoutConfig, theme: &Theme) -> Result<Vec<Cell>> {
    let doc = extract::parse_document(text)?;
    build_cells(&doc, config, theme)
}
