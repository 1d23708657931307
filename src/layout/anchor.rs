use crate::core::geo::{GeoPoint, Point};
use serde::{Deserialize, Serialize};

/// Which point of a child sits on its geographic anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// Top-left corner of a `width` x `height` box aligned on `(x, y)`
    pub fn top_left(self, x: i64, y: i64, width: i64, height: i64) -> (i64, i64) {
        let left = match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => x,
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => x - width / 2,
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => x - width,
        };
        let top = match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => y,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => y - height / 2,
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => y - height,
        };
        (left, top)
    }
}

/// Where a child element sits on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutAnchor {
    pub geo_point: GeoPoint,
    pub alignment: Alignment,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl LayoutAnchor {
    pub fn new(geo_point: GeoPoint, alignment: Alignment) -> Self {
        Self {
            geo_point,
            alignment,
            offset_x: 0,
            offset_y: 0,
        }
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Frame for a child of `width` x `height` whose anchor projects to
    /// `screen`
    pub fn resolve(&self, screen: Point, width: i32, height: i32) -> ChildFrame {
        let (x, y) = (screen.x.round() as i64, screen.y.round() as i64);
        let (left, top) = self
            .alignment
            .top_left(x, y, i64::from(width), i64::from(height));
        let left = left + i64::from(self.offset_x);
        let top = top + i64::from(self.offset_y);
        ChildFrame {
            left,
            top,
            right: left + i64::from(width),
            bottom: top + i64::from(height),
        }
    }
}

/// Placed rectangle of a child in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChildFrame {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl ChildFrame {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}
