use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::host::{DrawHandle, RenderSurface};

/// Draw-callback bookkeeping of an in-process host
#[derive(Debug, Default)]
pub struct SurfaceState {
    next_id: u64,
    active: BTreeSet<u64>,
    redraw_pending: bool,
    pub subscribe_count: usize,
    pub unsubscribe_count: usize,
    pub redraw_requests: usize,
}

/// Cloneable handle to one render surface; every clone sees the same
/// registrations
#[derive(Debug, Clone, Default)]
pub struct SharedSurface(Rc<RefCell<SurfaceState>>);

impl SharedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers currently subscribed
    pub fn active_handlers(&self) -> usize {
        self.0.borrow().active.len()
    }

    pub fn is_subscribed(&self, handle: DrawHandle) -> bool {
        self.0.borrow().active.contains(&handle.0)
    }

    pub fn subscribe_count(&self) -> usize {
        self.0.borrow().subscribe_count
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.0.borrow().unsubscribe_count
    }

    pub fn redraw_requests(&self) -> usize {
        self.0.borrow().redraw_requests
    }

    /// Returns and clears the pending redraw flag
    pub fn take_redraw(&self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().redraw_pending)
    }
}

impl RenderSurface for SharedSurface {
    fn subscribe(&mut self) -> DrawHandle {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.active.insert(id);
        state.subscribe_count += 1;
        DrawHandle(id)
    }

    fn unsubscribe(&mut self, handle: DrawHandle) {
        let mut state = self.0.borrow_mut();
        if state.active.remove(&handle.0) {
            state.unsubscribe_count += 1;
        } else {
            tracing::warn!("Unsubscribing unknown draw handler {:?}", handle);
        }
    }

    fn request_redraw(&mut self) {
        let mut state = self.0.borrow_mut();
        state.redraw_pending = true;
        state.redraw_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let surface = SharedSurface::new();
        let mut other = surface.clone();
        let handle = other.subscribe();
        assert!(surface.is_subscribed(handle));
        assert_eq!(surface.active_handlers(), 1);
        other.unsubscribe(handle);
        assert_eq!(surface.active_handlers(), 0);
        assert_eq!(surface.unsubscribe_count(), 1);
    }

    #[test]
    fn test_unknown_unsubscribe_not_counted() {
        let mut surface = SharedSurface::new();
        surface.unsubscribe(DrawHandle(7));
        assert_eq!(surface.unsubscribe_count(), 0);
    }

    #[test]
    fn test_take_redraw() {
        let mut surface = SharedSurface::new();
        assert!(!surface.take_redraw());
        surface.request_redraw();
        assert!(surface.take_redraw());
        assert!(!surface.take_redraw());
        assert_eq!(surface.redraw_requests(), 1);
    }
}
