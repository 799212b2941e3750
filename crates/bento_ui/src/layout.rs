//! Responsive bento grid placement.
//!
//! Three columns on wide viewports, two at or below the tablet breakpoint,
//! one at or below the phone breakpoint. A handful of leading cards span
//! extra columns or rows; placement is row-major and never backtracks.

use bento_core::Rect;

/// Column/row span of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Columns covered.
    pub columns: usize,
    /// Rows covered.
    pub rows: usize,
}

impl Span {
    /// A single cell.
    pub const ONE: Self = Self { columns: 1, rows: 1 };

    const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }
}

/// Layout manager for the card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BentoLayout {
    /// Widest the section ever gets.
    pub max_width: f32,
    /// Width at or below which the grid drops to two columns.
    pub tablet_breakpoint: f32,
    /// Width at or below which the grid drops to one column.
    pub phone_breakpoint: f32,
    /// Gap between cells on multi-column grids.
    pub gap: f32,
    /// Gap between cells on the single-column grid.
    pub phone_gap: f32,
    /// Row height on multi-column grids.
    pub row_height: f32,
    /// Row height on the single-column grid.
    pub phone_row_height: f32,
}

impl Default for BentoLayout {
    fn default() -> Self {
        Self {
            max_width: 1400.0,
            tablet_breakpoint: 1024.0,
            phone_breakpoint: 768.0,
            gap: 24.0,
            phone_gap: 16.0,
            row_height: 320.0,
            phone_row_height: 280.0,
        }
    }
}

impl BentoLayout {
    /// Number of columns at a viewport width.
    #[must_use]
    pub fn columns(&self, viewport_width: f32) -> usize {
        if viewport_width <= self.phone_breakpoint {
            1
        } else if viewport_width <= self.tablet_breakpoint {
            2
        } else {
            3
        }
    }

    /// Span of the card at `index` (0-based) on a grid with `columns` columns.
    #[must_use]
    pub fn span(columns: usize, index: usize) -> Span {
        match (columns, index) {
            (3, 2) => Span::new(1, 2),
            (3, 3 | 5) | (2, 2 | 5) => Span::new(2, 1),
            _ => Span::ONE,
        }
    }

    /// Lays out `count` cards in a section whose top-left corner is `origin`.
    ///
    /// Returns one rectangle per card, in card order.
    #[must_use]
    pub fn arrange(&self, origin: (f32, f32), viewport_width: f32, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }

        let columns = self.columns(viewport_width);
        let (gap, row_height) = if columns == 1 {
            (self.phone_gap, self.phone_row_height)
        } else {
            (self.gap, self.row_height)
        };
        let width = viewport_width.min(self.max_width).max(0.0);
        let column_width = ((width - gap * (columns - 1) as f32) / columns as f32).max(0.0);

        let mut occupied: Vec<Vec<bool>> = Vec::new();
        let mut cursor = (0_usize, 0_usize);
        let mut results = Vec::with_capacity(count);

        for index in 0..count {
            let span = Self::span(columns, index);
            let span = Span::new(span.columns.min(columns), span.rows);
            let (row, col) = Self::place(&mut occupied, cursor, columns, span);

            for r in row..row + span.rows {
                for c in col..col + span.columns {
                    occupied[r][c] = true;
                }
            }
            cursor = (row, col + span.columns);

            let x = origin.0 + col as f32 * (column_width + gap);
            let y = origin.1 + row as f32 * (row_height + gap);
            let w = column_width * span.columns as f32 + gap * (span.columns - 1) as f32;
            let h = row_height * span.rows as f32 + gap * (span.rows - 1) as f32;
            results.push(Rect::new(x, y, w, h));
        }

        results
    }

    /// Bounding rectangle of an arrangement, or `None` when it is empty.
    #[must_use]
    pub fn bounds(rects: &[Rect]) -> Option<Rect> {
        let (first, rest) = rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, rect| acc.union(rect)))
    }

    /// Finds the first free slot at or after the cursor that fits the span.
    fn place(occupied: &mut Vec<Vec<bool>>, cursor: (usize, usize), columns: usize, span: Span) -> (usize, usize) {
        let (mut row, mut col) = cursor;
        loop {
            if col + span.columns > columns {
                row += 1;
                col = 0;
                continue;
            }
            while occupied.len() < row + span.rows {
                occupied.push(vec![false; columns]);
            }
            let free = (row..row + span.rows)
                .all(|r| (col..col + span.columns).all(|c| !occupied[r][c]));
            if free {
                return (row, col);
            }
            col += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_by_width() {
        let layout = BentoLayout::default();
        assert_eq!(layout.columns(1400.0), 3);
        assert_eq!(layout.columns(1024.0), 2);
        assert_eq!(layout.columns(800.0), 2);
        assert_eq!(layout.columns(768.0), 1);
    }

    #[test]
    fn test_three_column_placement() {
        let layout = BentoLayout::default();
        // 1048 wide: (1048 - 48) / 3 = 333.33 per column
        let rects = layout.arrange((0.0, 0.0), 1048.0, 6);
        let col = (1048.0 - 48.0) / 3.0;

        assert_eq!(rects.len(), 6);
        // #3 is tall, in the third column
        assert!((rects[2].x - 2.0 * (col + 24.0)).abs() < 1e-3);
        assert!((rects[2].height - (320.0 * 2.0 + 24.0)).abs() < 1e-3);
        // #4 is wide, on the second row, first column
        assert_eq!(rects[3].x, 0.0);
        assert!((rects[3].y - 344.0).abs() < 1e-3);
        assert!((rects[3].width - (col * 2.0 + 24.0)).abs() < 1e-3);
        // #5 and #6 share the third row
        assert!((rects[4].y - 688.0).abs() < 1e-3);
        assert!((rects[5].x - (col + 24.0)).abs() < 1e-3);
        assert!((rects[5].y - 688.0).abs() < 1e-3);
    }

    #[test]
    fn test_two_column_placement() {
        let layout = BentoLayout::default();
        let rects = layout.arrange((0.0, 0.0), 1000.0, 4);

        // #3 spans both columns of row two; #4 drops to row three
        assert_eq!(rects[2].x, 0.0);
        assert!((rects[2].width - 1000.0).abs() < 1e-3);
        assert!((rects[3].y - 2.0 * 344.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_column_stacks() {
        let layout = BentoLayout::default();
        let rects = layout.arrange((10.0, 20.0), 400.0, 3);

        for (i, rect) in rects.iter().enumerate() {
            assert_eq!(rect.x, 10.0);
            assert!((rect.y - (20.0 + i as f32 * 296.0)).abs() < 1e-3);
            assert_eq!(rect.width, 400.0);
            assert_eq!(rect.height, 280.0);
        }
    }

    #[test]
    fn test_empty_and_bounds() {
        let layout = BentoLayout::default();
        assert!(layout.arrange((0.0, 0.0), 1200.0, 0).is_empty());
        assert_eq!(BentoLayout::bounds(&[]), None);

        let rects = layout.arrange((0.0, 0.0), 400.0, 2);
        assert_eq!(BentoLayout::bounds(&rects), Some(Rect::new(0.0, 0.0, 400.0, 576.0)));
    }
}
