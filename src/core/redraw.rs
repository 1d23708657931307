use crate::core::bounds::Bounds;
use crossbeam_channel::{Receiver, Sender};

/// A request to repaint part or all of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RedrawRequest {
    Full,
    /// Screen-space region
    Region(Bounds),
}

/// Cloneable sender that collaborators use to ask for a redraw once some
/// asynchronous work (a tile load, a snap lookup) completes
#[derive(Debug, Clone)]
pub struct RedrawHandle {
    sender: Sender<RedrawRequest>,
}

impl RedrawHandle {
    pub fn request_redraw(&self) {
        self.send(RedrawRequest::Full);
    }

    pub fn request_region(&self, region: Bounds) {
        self.send(RedrawRequest::Region(region));
    }

    fn send(&self, request: RedrawRequest) {
        if self.sender.send(request).is_err() {
            log::debug!("redraw request dropped, map view is gone");
        }
    }
}

/// Owner side of the redraw channel
#[derive(Debug)]
pub(crate) struct RedrawQueue {
    sender: Sender<RedrawRequest>,
    receiver: Receiver<RedrawRequest>,
}

impl RedrawQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub(crate) fn handle(&self) -> RedrawHandle {
        RedrawHandle {
            sender: self.sender.clone(),
        }
    }

    pub(crate) fn drain(&self) -> Vec<RedrawRequest> {
        self.receiver.try_iter().collect()
    }
}
