use super::types::{Rect, Size};

/// Columns for `children` items: the smallest square grid that holds them,
/// capped at `max_columns`. The same rule applies at every nesting level.
pub(super) fn column_count(children: usize, max_columns: usize) -> usize {
    if children == 0 {
        return 0;
    }
    let mut columns = 1;
    while columns * columns < children {
        columns += 1;
    }
    columns.min(max_columns.max(1))
}

/// Row-major grid of child footprints. Column widths and row heights are
/// the largest footprint in that column or row.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct GridPlan {
    columns: usize,
    col_widths: Vec<f32>,
    row_heights: Vec<f32>,
    spacing: f32,
}

impl GridPlan {
    pub(super) fn new(sizes: &[Size], max_columns: usize, spacing: f32) -> Self {
        let columns = column_count(sizes.len(), max_columns);
        let rows = if columns == 0 {
            0
        } else {
            sizes.len().div_ceil(columns)
        };
        let mut col_widths = vec![0.0_f32; columns];
        let mut row_heights = vec![0.0_f32; rows];
        for (idx, size) in sizes.iter().enumerate() {
            let (row, col) = (idx / columns, idx % columns);
            col_widths[col] = col_widths[col].max(size.width);
            row_heights[row] = row_heights[row].max(size.height);
        }
        Self {
            columns,
            col_widths,
            row_heights,
            spacing,
        }
    }

    pub(super) fn content_size(&self) -> Size {
        Size::new(
            span(&self.col_widths, self.spacing),
            span(&self.row_heights, self.spacing),
        )
    }

    /// Slot of the `idx`-th child, relative to the content origin.
    pub(super) fn slot(&self, idx: usize) -> Rect {
        let (row, col) = (idx / self.columns, idx % self.columns);
        let x = self.col_widths[..col].iter().sum::<f32>() + col as f32 * self.spacing;
        let y = self.row_heights[..row].iter().sum::<f32>() + row as f32 * self.spacing;
        Rect::new(x, y, self.col_widths[col], self.row_heights[row])
    }
}

fn span(extents: &[f32], spacing: f32) -> f32 {
    if extents.is_empty() {
        return 0.0;
    }
    extents.iter().sum::<f32>() + (extents.len() - 1) as f32 * spacing
}
