//! Resize Coordinator
//!
//! Relays container width changes to the live surface. It never owns the
//! surface (the listener holds a weak reference) and never touches series
//! data or the visible range.

use crate::errors::ChartResult;
use crate::surface::{HostContainer, ResizeRegistration, SharedSurface};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Default)]
pub struct ResizeCoordinator {
    registration: Option<Box<dyn ResizeRegistration>>,
    relayed: Rc<Cell<usize>>,
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `container` on behalf of `surface`. A previous
    /// observation is detached first.
    pub fn attach<C>(&mut self, container: &C, surface: &SharedSurface) -> ChartResult<()>
    where
        C: HostContainer + ?Sized,
    {
        self.detach();
        let target = Rc::downgrade(surface);
        let relayed = self.relayed.clone();
        let registration = container.observe_resize(Box::new(move |width| {
            let Some(surface) = target.upgrade() else {
                return;
            };
            match surface.try_borrow_mut() {
                Ok(mut surface) => {
                    surface.apply_width(width);
                    relayed.set(relayed.get() + 1);
                }
                Err(_) => trace!(width, "surface busy, dropping resize"),
            };
        }))?;
        self.registration = Some(registration);
        debug!("resize observer attached");
        Ok(())
    }

    /// Disconnects the observer. Returns `false` when nothing was attached,
    /// so a second call is a no-op.
    pub fn detach(&mut self) -> bool {
        match self.registration.take() {
            Some(mut registration) => {
                registration.disconnect();
                debug!("resize observer detached");
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }

    /// Width updates delivered to the surface so far.
    pub fn relayed(&self) -> usize {
        self.relayed.get()
    }
}

impl Drop for ResizeCoordinator {
    fn drop(&mut self) {
        self.detach();
    }
}
