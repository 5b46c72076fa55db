//! Recursive grid layout over the containment forest.
//!
//! Two passes: a post-order pass sizes every component from its children's
//! footprints, then a pre-order pass assigns absolute positions top-down.

mod grid;
mod text;
pub(crate) mod types;
pub use types::*;

use grid::GridPlan;
use text::label_width;

use log::debug;

use crate::config::LayoutConfig;
use crate::theme::Theme;
use crate::tree::Forest;
use crate::validate::ValidatedGraph;

pub fn compute_layout(
    graph: &ValidatedGraph<'_>,
    forest: &Forest,
    theme: &Theme,
    config: &LayoutConfig,
) -> Layout {
    let (sizes, grids) = measure(graph, forest, theme, config);

    let mut boxes = vec![Rect::default(); forest.len()];
    place_roots(graph, forest, &sizes, config, &mut boxes);

    let inset_top = config.padding + config.title_bar_height;
    for &idx in forest.preorder() {
        let Some(grid) = &grids[idx] else {
            continue;
        };
        let parent = boxes[idx];
        let content_x = parent.x + config.padding;
        let content_y = parent.y + inset_top;
        for (slot_idx, &child) in forest.node(idx).children.iter().enumerate() {
            let slot = grid.slot(slot_idx);
            let size = sizes[child];
            boxes[child] = Rect::new(
                content_x + slot.x + (slot.width - size.width) / 2.0,
                content_y + slot.y + (slot.height - size.height) / 2.0,
                size.width,
                size.height,
            );
        }
    }

    let (max_x, max_y) = boxes
        .iter()
        .fold((0.0_f32, 0.0_f32), |(mx, my), b| (mx.max(b.right()), my.max(b.bottom())));
    let width = if boxes.is_empty() { 0.0 } else { max_x + config.origin_x };
    let height = if boxes.is_empty() { 0.0 } else { max_y + config.origin_y };

    debug!(components = boxes.len(), width, height; "computed layout");

    Layout {
        boxes,
        width,
        height,
    }
}

/// Post-order pass: leaf footprints are fixed, container footprints wrap
/// their children's grid plus padding and the title bar.
fn measure(
    graph: &ValidatedGraph<'_>,
    forest: &Forest,
    theme: &Theme,
    config: &LayoutConfig,
) -> (Vec<Size>, Vec<Option<GridPlan>>) {
    let mut sizes = vec![Size::default(); forest.len()];
    let mut grids: Vec<Option<GridPlan>> = vec![None; forest.len()];

    for idx in forest.postorder() {
        let component = graph.component(idx);
        if !component.kind.is_container() {
            sizes[idx] = Size::new(config.node_width, config.node_height);
            continue;
        }

        let child_sizes: Vec<Size> = forest
            .node(idx)
            .children
            .iter()
            .map(|&child| sizes[child])
            .collect();
        let grid = GridPlan::new(&child_sizes, config.max_columns, config.node_spacing);
        let content = grid.content_size();
        let title = label_width(&component.source.name, theme.font_size);

        // Whole-pixel footprints keep slot centering exact in f32.
        let width = (content.width + 2.0 * config.padding)
            .max(title + 2.0 * config.padding)
            .max(config.min_boundary_width)
            .ceil();
        let height = (content.height + 2.0 * config.padding + config.title_bar_height)
            .max(config.min_boundary_height)
            .ceil();
        sizes[idx] = Size::new(width, height);
        grids[idx] = Some(grid);
    }

    (sizes, grids)
}

/// Floating leaves (actors and unparented leaves) form one row at the
/// origin; boundary roots are stacked below it in input order.
fn place_roots(
    graph: &ValidatedGraph<'_>,
    forest: &Forest,
    sizes: &[Size],
    config: &LayoutConfig,
    boxes: &mut [Rect],
) {
    let (boundaries, floating): (Vec<usize>, Vec<usize>) = forest
        .roots()
        .iter()
        .partition(|&&idx| graph.component(idx).kind.is_container());

    let mut x = config.origin_x;
    let mut row_height = 0.0_f32;
    for &idx in &floating {
        let size = sizes[idx];
        boxes[idx] = Rect::new(x, config.origin_y, size.width, size.height);
        x += size.width + config.root_spacing;
        row_height = row_height.max(size.height);
    }

    let mut y = if floating.is_empty() {
        config.origin_y
    } else {
        config.origin_y + row_height + config.root_spacing
    };
    for &idx in &boundaries {
        let size = sizes[idx];
        boxes[idx] = Rect::new(config.origin_x, y, size.width, size.height);
        y += size.height + config.root_spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellIdMode;
    use crate::ir::{Component, Document};
    use crate::validate::validate;

    fn component(id: &str, kind: &str, parent: Option<&str>) -> Component {
        Component {
            id: id.to_string(),
            name: id.to_string(),
            kind: kind.to_string(),
            parent_id: parent.map(str::to_string),
            description: None,
            subtype: None,
        }
    }

    fn run(components: Vec<Component>, config: &LayoutConfig) -> Layout {
        let doc = Document {
            components,
            flows: vec![],
        };
        let graph = validate(&doc, CellIdMode::Component).unwrap();
        let forest = Forest::build(&graph);
        compute_layout(&graph, &forest, &Theme::dfd_default(), config)
    }

    #[test]
    fn nested_chain_is_inset_at_every_level() {
        let config = LayoutConfig::default();
        let layout = run(
            vec![
                component("t1", "tenancy", None),
                component("v1", "container", Some("t1")),
                component("c1", "compute", Some("v1")),
            ],
            &config,
        );
        let (t1, v1, c1) = (layout.boxes[0], layout.boxes[1], layout.boxes[2]);
        assert!(t1.contains_inset(&v1, config.padding));
        assert!(v1.contains_inset(&c1, config.padding));
        assert_eq!((t1.x, t1.y), (config.origin_x, config.origin_y));
        assert_eq!((c1.width, c1.height), (config.node_width, config.node_height));
    }

    #[test]
    fn large_child_inflates_parent() {
        let mut config = LayoutConfig::default();
        config.min_boundary_width = 0.0;
        config.min_boundary_height = 0.0;
        let mut components = vec![component("t", "tenancy", None), component("big", "container", Some("t"))];
        for i in 0..9 {
            components.push(component(&format!("c{i}"), "compute", Some("big")));
        }
        components.push(component("small", "storage", Some("t")));
        let layout = run(components, &config);

        let big = layout.boxes[1];
        // 3x3 grid of 120x60 nodes with 30 spacing.
        assert_eq!(big.width, 3.0 * 120.0 + 2.0 * 30.0 + 2.0 * config.padding);
        assert_eq!(
            big.height,
            3.0 * 60.0 + 2.0 * 30.0 + 2.0 * config.padding + config.title_bar_height
        );
        let outer = layout.boxes[0];
        assert!(outer.width >= big.width + 2.0 * config.padding);
        let small = layout.boxes[11];
        assert!(!small.intersects(&big));
    }

    #[test]
    fn empty_container_keeps_minimum_footprint() {
        let config = LayoutConfig::default();
        let layout = run(vec![component("n", "network", None)], &config);
        assert_eq!(layout.boxes[0].width, config.min_boundary_width);
        assert_eq!(layout.boxes[0].height, config.min_boundary_height);
    }

    #[test]
    fn long_title_widens_boundary() {
        let config = LayoutConfig::default();
        let mut long = component("v", "container", None);
        long.name = "Shared services VPC for the production payments platform".repeat(2);
        let layout = run(vec![long], &config);
        assert!(layout.boxes[0].width > config.min_boundary_width);
    }

    #[test]
    fn floating_leaves_form_a_row_above_boundaries() {
        let config = LayoutConfig::default();
        let layout = run(
            vec![
                component("u1", "actor", None),
                component("t", "tenancy", None),
                component("u2", "actor", Some("t")),
            ],
            &config,
        );
        let (u1, t, u2) = (layout.boxes[0], layout.boxes[1], layout.boxes[2]);
        assert_eq!(u1.y, u2.y);
        assert_eq!(u2.x, u1.right() + config.root_spacing);
        assert_eq!(t.y, u1.bottom() + config.root_spacing);
        assert!(!t.intersects(&u2));
    }

    #[test]
    fn stacked_boundary_roots_do_not_overlap() {
        let config = LayoutConfig::default();
        let layout = run(
            vec![
                component("a", "tenancy", None),
                component("b", "container", None),
                component("c", "network", None),
            ],
            &config,
        );
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert!(!layout.boxes[i].intersects(&layout.boxes[j]));
            }
        }
        assert_eq!(layout.boxes[1].y, layout.boxes[0].bottom() + config.root_spacing);
    }

    #[test]
    fn empty_forest_has_zero_extent() {
        let layout = run(vec![], &LayoutConfig::default());
        assert!(layout.boxes.is_empty());
        assert_eq!((layout.width, layout.height), (0.0, 0.0));
    }
}
