//! Axis-aligned box math shared by shapes, tools and renderers.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// An axis-aligned box stored as origin plus size.
///
/// Used both for document-space boxes (shape bounds, screenshot regions)
/// and for their screen-space projections. Width and height are never
/// negative for boxes built through [`PageBox::from_points`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PageBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Normalized box spanning two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &PageBox) -> PageBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        PageBox::new(
            x,
            y,
            self.max_x().max(other.max_x()) - x,
            self.max_y().max(other.max_y()) - y,
        )
    }

    /// Union of every box in the iterator, or `None` when it is empty.
    pub fn common_bounds<'a>(boxes: impl IntoIterator<Item = &'a PageBox>) -> Option<PageBox> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<PageBox>, b| match acc {
                Some(u) => Some(u.union(b)),
                None => Some(*b),
            })
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Whether the two boxes overlap with a non-zero area.
    pub fn intersects(&self, other: &PageBox) -> bool {
        self.to_rect().intersect(other.to_rect()).area() > 0.0
    }

    /// Grow the box by `amount` on every side.
    pub fn expand(&self, amount: f64) -> PageBox {
        PageBox::new(
            self.x - amount,
            self.y - amount,
            self.w + amount * 2.0,
            self.h + amount * 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}
