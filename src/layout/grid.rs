use crate::{
    foundation::core::{Bounds, Size},
    layout::{GridCell, LayoutOptions, LayoutResult, Placement},
    scene::model::{LayoutConfig, NodeDef, PrimitiveKind},
};

const DEFAULT_COLUMNS: u32 = 2;
const DEFAULT_GAP: f64 = 24.0;
const DEFAULT_PADDING: f64 = 40.0;
const DEFAULT_COLUMN_WIDTH: f64 = 340.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GridParams {
    pub(crate) columns: u32,
    pub(crate) column_width: f64,
    pub(crate) column_gap: f64,
    pub(crate) row_gap: f64,
    pub(crate) padding: f64,
    pub(crate) masonry: bool,
}

impl GridParams {
    pub(crate) fn from_config(config: &LayoutConfig, opts: &LayoutOptions) -> Self {
        let columns = opts
            .viewport_width
            .and_then(|w| config.columns_for_width(w))
            .or(config.columns)
            .unwrap_or(DEFAULT_COLUMNS)
            .max(1);
        let gap = config.gap.unwrap_or(DEFAULT_GAP);
        Self {
            columns,
            column_width: config.column_width.unwrap_or(DEFAULT_COLUMN_WIDTH),
            column_gap: config.column_gap.unwrap_or(gap),
            row_gap: config.row_gap.unwrap_or(gap),
            padding: config.padding.unwrap_or(DEFAULT_PADDING),
            masonry: config.masonry.unwrap_or(false),
        }
    }

    /// Width of `span` adjacent columns including the gaps between them.
    pub(crate) fn span_width(&self, span: u32) -> f64 {
        let span = f64::from(span.max(1));
        self.column_width * span + self.column_gap * (span - 1.0)
    }

    pub(crate) fn column_x(&self, column: u32) -> f64 {
        self.padding + f64::from(column) * (self.column_width + self.column_gap)
    }

    /// Final width: multi-column spans always use the spanned width.
    fn placed_width(&self, span: u32, resolved: Size) -> f64 {
        if span > 1 {
            self.span_width(span)
        } else {
            resolved.width
        }
    }
}

/// Explicit size, or column-derived width plus a per-primitive default height.
pub(crate) fn resolve_size(node: &NodeDef, params: &GridParams) -> Size {
    if let Some(size) = node.size.value() {
        return size;
    }
    let width = params.span_width(node.col_span());
    match node.kind {
        PrimitiveKind::Stack => Size::new(width, 380.0),
        PrimitiveKind::Queue => Size::new(width, 160.0),
        PrimitiveKind::Heap => Size::new(width, 200.0),
        PrimitiveKind::Timeline => Size::new(params.span_width(params.columns), 240.0),
        PrimitiveKind::Box => Size::new(width, 200.0),
        PrimitiveKind::Group => Size::new(width, 300.0),
        _ => Size::new(width, 200.0),
    }
}

pub(crate) fn grid_layout(nodes: &[&NodeDef], params: &GridParams) -> LayoutResult {
    let sizes: Vec<Size> = nodes.iter().map(|n| resolve_size(n, params)).collect();
    if params.masonry {
        masonry_layout(nodes, &sizes, params)
    } else {
        standard_layout(nodes, &sizes, params)
    }
}

/// Shortest-column-first packing with one running height per column.
fn masonry_layout(nodes: &[&NodeDef], sizes: &[Size], params: &GridParams) -> LayoutResult {
    let columns = params.columns as usize;
    let mut heights = vec![params.padding; columns];
    let mut out = LayoutResult::default();

    let mut hinted: Vec<usize> = Vec::new();
    let mut auto: Vec<usize> = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        if node.column_hint().is_some() {
            hinted.push(idx);
        } else {
            auto.push(idx);
        }
    }
    // Stable: equal (column, row) keys keep definition order.
    hinted.sort_by_key(|&idx| {
        let n = nodes[idx];
        (n.column_hint().unwrap_or(0), n.row_hint().unwrap_or(0))
    });

    for idx in hinted {
        let node = nodes[idx];
        let size = sizes[idx];
        let column = node.column_hint().unwrap_or(0);
        let span = node.col_span();
        let start = (column as usize).min(columns);
        let end = (column as usize)
            .saturating_add(span as usize)
            .min(columns)
            .max(start);
        let spanned = start..end;

        let y = heights[spanned.clone()]
            .iter()
            .copied()
            .fold(params.padding, f64::max);
        let bounds = Bounds::new(
            params.column_x(column),
            y,
            params.placed_width(span, size),
            size.height,
        );
        out.insert(&node.id, Placement::at(bounds));

        let next = y + size.height + params.row_gap;
        for h in &mut heights[spanned] {
            *h = next;
        }
    }

    for idx in auto {
        let node = nodes[idx];
        let size = sizes[idx];
        let span = node.col_span().min(params.columns);

        let mut best_col = 0usize;
        let mut best_y = f64::INFINITY;
        for c in 0..=(columns - span as usize) {
            let window_max = heights[c..c + span as usize]
                .iter()
                .copied()
                .fold(0.0, f64::max);
            if window_max < best_y {
                best_y = window_max;
                best_col = c;
            }
        }

        let bounds = Bounds::new(
            params.column_x(best_col as u32),
            best_y,
            params.placed_width(span, size),
            size.height,
        );
        out.insert(&node.id, Placement::at(bounds));

        let next = best_y + size.height + params.row_gap;
        for h in &mut heights[best_col..best_col + span as usize] {
            *h = next;
        }
    }

    out
}

/// One placed node's footprint: rows `row..row_end`, columns `col..col_end`.
#[derive(Clone, Copy, Debug)]
struct Footprint {
    row: usize,
    row_end: usize,
    col: usize,
    col_end: usize,
    per_row: f64,
}

impl Footprint {
    fn intersects(&self, row: usize, row_end: usize, col: usize, col_end: usize) -> bool {
        self.row < row_end && row < self.row_end && self.col < col_end && col < self.col_end
    }

    fn covers_row(&self, row: usize) -> bool {
        self.row <= row && row < self.row_end
    }
}

/// Sparse occupancy: one footprint per placed node.
struct Occupancy {
    columns: usize,
    placed: Vec<Footprint>,
}

impl Occupancy {
    fn new(columns: usize) -> Self {
        Self {
            columns,
            placed: Vec::new(),
        }
    }

    /// First footprint overlapping the candidate span, if any.
    fn blocker(
        &self,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Option<Footprint> {
        let row_end = row.saturating_add(row_span);
        let col_end = col.saturating_add(col_span);
        self.placed
            .iter()
            .copied()
            .find(|f| f.intersects(row, row_end, col, col_end))
    }

    /// Next row where a span of `row_span` rows could fit after none did at `row`.
    fn next_open_row(&self, row: usize, row_span: usize) -> usize {
        let row_end = row.saturating_add(row_span);
        self.placed
            .iter()
            .filter(|f| f.col < f.col_end && f.row < row_end && row < f.row_end)
            .map(|f| f.row_end)
            .min()
            .unwrap_or(row)
            .max(row.saturating_add(1))
    }

    /// Mark the span occupied (clipped to the grid width) and raise the spanned row heights.
    fn occupy(&mut self, cell: GridCell, row_span: usize, col_span: usize, h: f64) {
        let row = cell.row as usize;
        let col = (cell.column as usize).min(self.columns);
        let col_end = col.saturating_add(col_span).min(self.columns);
        self.placed.push(Footprint {
            row,
            row_end: row.saturating_add(row_span),
            col,
            col_end,
            per_row: h / row_span as f64,
        });
    }

    /// Summed height of rows `from..to`; each row is as tall as its tallest share.
    fn rows_height(&self, from: usize, to: usize) -> f64 {
        if from >= to {
            return 0.0;
        }
        let mut cuts = vec![from, to];
        for f in &self.placed {
            for edge in [f.row, f.row_end] {
                if from < edge && edge < to {
                    cuts.push(edge);
                }
            }
        }
        cuts.sort_unstable();
        cuts.dedup();

        cuts.windows(2)
            .map(|w| {
                let height = self
                    .placed
                    .iter()
                    .filter(|f| f.covers_row(w[0]))
                    .map(|f| f.per_row)
                    .fold(0.0, f64::max);
                height * (w[1] - w[0]) as f64
            })
            .sum()
    }
}

/// CSS-grid-like placement: explicit cells first, then row-major auto-placement.
fn standard_layout(nodes: &[&NodeDef], sizes: &[Size], params: &GridParams) -> LayoutResult {
    let mut grid = Occupancy::new(params.columns as usize);
    // (cell, effective column span) per node, filled by the two placement passes.
    let mut assigned: Vec<Option<(GridCell, u32)>> = vec![None; nodes.len()];

    for (idx, node) in nodes.iter().enumerate() {
        if let (Some(row), Some(column)) = (node.row_hint(), node.column_hint()) {
            let cell = GridCell { row, column };
            let span = node.col_span();
            grid.occupy(
                cell,
                node.row_span() as usize,
                span as usize,
                sizes[idx].height,
            );
            assigned[idx] = Some((cell, span));
        }
    }

    let columns = params.columns as usize;
    let (mut cur_row, mut cur_col) = (0usize, 0usize);
    for (idx, node) in nodes.iter().enumerate() {
        if assigned[idx].is_some() {
            continue;
        }
        let col_span = node.col_span().min(params.columns);
        let row_span = node.row_span() as usize;
        // A row scanned from column 0 without a fit stays full until a blocker ends.
        let mut scanned_whole_row = cur_col == 0;
        loop {
            if cur_col + col_span as usize <= columns {
                match grid.blocker(cur_row, cur_col, row_span, col_span as usize) {
                    None => {
                        let cell = GridCell {
                            row: u32::try_from(cur_row).unwrap_or(u32::MAX),
                            column: cur_col as u32,
                        };
                        grid.occupy(cell, row_span, col_span as usize, sizes[idx].height);
                        assigned[idx] = Some((cell, col_span));
                        cur_col += col_span as usize;
                        if cur_col >= columns {
                            cur_col = 0;
                            cur_row = cur_row.saturating_add(1);
                        }
                        break;
                    }
                    Some(blocker) => {
                        cur_col = blocker.col_end.max(cur_col + 1);
                        continue;
                    }
                }
            }
            cur_row = if scanned_whole_row {
                grid.next_open_row(cur_row, row_span)
            } else {
                cur_row.saturating_add(1)
            };
            cur_col = 0;
            scanned_whole_row = true;
        }
    }

    let mut out = LayoutResult::default();
    for (idx, node) in nodes.iter().enumerate() {
        let Some((cell, col_span)) = assigned[idx] else {
            continue;
        };
        let row = cell.row as usize;
        let row_span = node.row_span() as usize;

        let y = params.padding + grid.rows_height(0, row) + params.row_gap * row as f64;
        let spanned_height = grid.rows_height(row, row.saturating_add(row_span))
            + params.row_gap * (row_span - 1) as f64;

        let bounds = Bounds::new(
            params.column_x(cell.column),
            y,
            params.placed_width(col_span, sizes[idx]),
            spanned_height.max(sizes[idx].height),
        );
        out.insert(
            &node.id,
            Placement {
                bounds,
                cell: Some(cell),
            },
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
