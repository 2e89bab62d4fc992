// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map-plane helpers: axis selection and cell-grid snapping.

use kurbo::{Point, Rect, Size};

/// One of the two planar axes.
///
/// The k-d tree alternates between them by depth: `X` on even levels, `Y`
/// on odd levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis (growing south in the map plane).
    Y,
}

impl Axis {
    /// The axis for a tree level: `X` when `level` is even, `Y` otherwise.
    #[inline(always)]
    pub const fn for_level(level: u32) -> Self {
        if level & 1 == 0 { Self::X } else { Self::Y }
    }

    /// The other axis.
    #[inline(always)]
    pub const fn complement(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// The `x` or `y` component of a point, selected by axis.
#[inline(always)]
pub fn axis_value(point: Point, axis: Axis) -> f64 {
    match axis {
        Axis::X => point.x,
        Axis::Y => point.y,
    }
}

/// Snap `rect` outward onto a uniform grid of `cell`-sized tiles.
///
/// The origin moves toward the plane origin and the size grows so that both
/// become whole multiples of the cell size; the result always covers the
/// input and always pads at least one map unit past its far edges. Expects
/// a nonnegative map plane (see [`Projection::world_rect`]) and a cell of
/// at least one map unit per side; cell sizes in practice are thousands of
/// units, so the `ceil` rounding below is noise.
///
/// [`Projection::world_rect`]: crate::Projection::world_rect
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the integral-cast check mirrors how the grid consumes these sizes"
)]
pub fn normalize_rect_to_cells(rect: Rect, cell: Size) -> Rect {
    let shift_x = (rect.x0 % cell.width).ceil();
    let shift_y = (rect.y0 % cell.height).ceil();

    let mut width = rect.width() + shift_x;
    let mut height = rect.height() + shift_y;
    width += (cell.width - width % cell.width).ceil();
    height += (cell.height - height % cell.height).ceil();

    debug_assert!(
        (width as u64) % (cell.width as u64) == 0 && (height as u64) % (cell.height as u64) == 0,
        "normalized size must be a whole number of cells"
    );

    Rect::from_origin_size((rect.x0 - shift_x, rect.y0 - shift_y), (width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_for_level_alternates() {
        assert_eq!(Axis::for_level(0), Axis::X);
        assert_eq!(Axis::for_level(1), Axis::Y);
        assert_eq!(Axis::for_level(2), Axis::X);
        assert_eq!(Axis::X.complement(), Axis::Y);
        assert_eq!(Axis::Y.complement(), Axis::X);
    }

    #[test]
    fn axis_value_selects_component() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(axis_value(p, Axis::X), 3.0);
        assert_eq!(axis_value(p, Axis::Y), 7.0);
    }

    #[test]
    fn normalize_snaps_origin_and_size() {
        let rect = Rect::from_origin_size((1003.0, 2001.0), (998.0, 1499.0));
        let cell = Size::new(500.0, 500.0);
        let n = normalize_rect_to_cells(rect, cell);

        assert_eq!(n.x0 % cell.width, 0.0);
        assert_eq!(n.y0 % cell.height, 0.0);
        assert_eq!(n.width() % cell.width, 0.0);
        assert_eq!(n.height() % cell.height, 0.0);
    }

    #[test]
    fn normalize_covers_input() {
        let rect = Rect::from_origin_size((1003.0, 2001.0), (998.0, 1499.0));
        let n = normalize_rect_to_cells(rect, Size::new(500.0, 500.0));

        assert!(n.x0 <= rect.x0);
        assert!(n.y0 <= rect.y0);
        assert!(n.x1 >= rect.x1);
        assert!(n.y1 >= rect.y1);
    }

    #[test]
    fn normalize_pads_exact_multiples() {
        // A rect already aligned to the grid still grows by a full cell,
        // so annotations on its far edges never sit on the normalized
        // boundary.
        let rect = Rect::from_origin_size((1000.0, 2000.0), (3000.0, 2000.0));
        let cell = Size::new(1000.0, 1000.0);
        let n = normalize_rect_to_cells(rect, cell);

        assert_eq!(n.x0, 1000.0);
        assert_eq!(n.y0, 2000.0);
        assert_eq!(n.width(), 4000.0);
        assert_eq!(n.height(), 3000.0);
    }

    #[test]
    fn normalize_handles_fractional_origin() {
        let rect = Rect::from_origin_size((1003.4, 2001.7), (998.2, 1499.9));
        let cell = Size::new(500.0, 500.0);
        let n = normalize_rect_to_cells(rect, cell);

        assert!(n.x0 <= rect.x0 && n.x1 >= rect.x1);
        assert!(n.y0 <= rect.y0 && n.y1 >= rect.y1);
    }
}
