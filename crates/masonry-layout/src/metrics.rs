//! Grid metrics: gap, column count and column width.
//!
//! Metrics are derived from the live grid on every read. Nothing here caches
//! them, because the grid is responsive and may reflow between two calls.

/// Geometry of a uniform column grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Horizontal gap between adjacent columns, in pixels.
    pub gap: f32,
    /// Number of columns.
    pub column_count: u32,
    /// Width of a single column, in pixels.
    pub column_width: f32,
}

impl GridMetrics {
    /// Distribute `grid_width` pixels across `column_count` columns with
    /// `gap` pixels between them.
    ///
    /// Returns `None` for a grid without columns.
    pub fn from_grid(grid_width: f32, column_count: u32, gap: f32) -> Option<Self> {
        if column_count == 0 {
            return None;
        }
        let total_gap = gap * column_count.saturating_sub(1) as f32;
        let column_width = ((grid_width - total_gap) / column_count as f32).max(0.0);
        Some(Self {
            gap,
            column_count,
            column_width,
        })
    }

    /// Left edge of column `index`, relative to the grid's left edge.
    pub fn column_x(&self, index: usize) -> f32 {
        index as f32 * (self.column_width + self.gap)
    }

    /// Total width covered by all columns and interior gaps.
    pub fn grid_width(&self) -> f32 {
        self.column_width * self.column_count as f32
            + self.gap * self.column_count.saturating_sub(1) as f32
    }
}

/// Source of the grid's current metrics.
///
/// Implementations must report the layout as it is rendered right now, not a
/// value remembered from an earlier read. `None` means there is no grid to
/// measure.
pub trait GridGeometryProvider {
    fn metrics(&self) -> Option<GridMetrics>;
}
