use crate::core::bounds::Bounds;
use crate::core::projection::Projection;
use crate::layout::anchor::{ChildFrame, LayoutAnchor};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An element positioned on the map by geographic anchor.
///
/// Children are moved with the map but never rotated themselves.
pub trait MapChild {
    fn anchor(&self) -> LayoutAnchor;
    /// Measured width and height in pixels
    fn measured_size(&self) -> (i32, i32);
    fn is_visible(&self) -> bool {
        true
    }
    /// Receives the frame computed by the latest layout pass
    fn layout(&mut self, frame: ChildFrame);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId(u64);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "child#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FirstLayoutListenerId(u64);

pub type FirstLayoutListener = Box<dyn FnOnce(Bounds)>;

/// Positions geo-anchored children from a projection snapshot and tracks
/// whether the first layout pass has happened
#[derive(Default)]
pub struct ChildPlacementEngine {
    children: Vec<(ChildId, Box<dyn MapChild>)>,
    listeners: Vec<(FirstLayoutListenerId, FirstLayoutListener)>,
    next_id: u64,
    ready: bool,
}

impl ChildPlacementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, child: Box<dyn MapChild>) -> ChildId {
        let id = ChildId(self.allocate_id());
        self.children.push((id, child));
        id
    }

    pub fn remove_child(&mut self, id: ChildId) -> Result<Box<dyn MapChild>> {
        let index = self
            .children
            .iter()
            .position(|(child_id, _)| *child_id == id)
            .ok_or(MapError::UnknownChild(id))?;
        Ok(self.children.remove(index).1)
    }

    pub fn child(&self, id: ChildId) -> Option<&dyn MapChild> {
        self.children
            .iter()
            .find(|(child_id, _)| *child_id == id)
            .map(|(_, child)| child.as_ref())
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the first layout pass has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Queues a callback for the first layout pass. Returns `None` and drops
    /// the callback if that pass already happened.
    pub fn add_first_layout_listener<F>(&mut self, listener: F) -> Option<FirstLayoutListenerId>
    where
        F: FnOnce(Bounds) + 'static,
    {
        if self.ready {
            return None;
        }
        let id = FirstLayoutListenerId(self.allocate_id());
        self.listeners.push((id, Box::new(listener)));
        Some(id)
    }

    pub fn remove_first_layout_listener(&mut self, id: FirstLayoutListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Places every visible child. Returns true if this was the first pass,
    /// after firing and discarding the pending first-layout listeners.
    pub fn layout(&mut self, projection: &Projection, bounds: Bounds) -> bool {
        for (_, child) in self.children.iter_mut() {
            if !child.is_visible() {
                continue;
            }
            let anchor = child.anchor();
            let (width, height) = child.measured_size();
            let mut point = projection.to_pixels(&anchor.geo_point);
            if projection.orientation() != 0.0 {
                point = projection.rotate_and_scale_point(&point);
            }
            child.layout(anchor.resolve(point, width, height));
        }

        if self.ready {
            return false;
        }
        self.ready = true;
        for (_, listener) in self.listeners.drain(..) {
            listener(bounds);
        }
        true
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl fmt::Debug for ChildPlacementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildPlacementEngine")
            .field("children", &self.children.len())
            .field("pending_listeners", &self.listeners.len())
            .field("ready", &self.ready)
            .finish()
    }
}
