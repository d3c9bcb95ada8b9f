use crate::gesture::PointerId;

/// Host side of pointer capture (e.g. `setPointerCapture` plus document
/// move/up listeners).
pub trait CaptureSurface {
    fn acquire(&mut self, pointer: PointerId);
    fn release(&mut self, pointer: PointerId);
}

/// For headless hosts that have no listeners to manage.
#[derive(Debug, Default)]
pub struct NoCapture;

impl CaptureSurface for NoCapture {
    fn acquire(&mut self, _pointer: PointerId) {}
    fn release(&mut self, _pointer: PointerId) {}
}

/// Owns a surface and the pointer it currently captures, if any.
/// Dropping the guard releases the capture.
#[derive(Debug)]
pub struct CaptureGuard<S: CaptureSurface> {
    surface: S,
    held: Option<PointerId>,
}

impl<S: CaptureSurface> CaptureGuard<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, held: None }
    }

    pub fn acquire(&mut self, pointer: PointerId) {
        if self.held == Some(pointer) {
            return;
        }
        // a stale capture is released before a new one is taken
        self.release_held();
        self.surface.acquire(pointer);
        self.held = Some(pointer);
    }

    pub fn release(&mut self, pointer: PointerId) {
        if self.held == Some(pointer) {
            self.release_held();
        }
    }

    pub fn release_held(&mut self) {
        if let Some(pointer) = self.held.take() {
            self.surface.release(pointer);
        }
    }

    pub fn held(&self) -> Option<PointerId> {
        self.held
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: CaptureSurface> Drop for CaptureGuard<S> {
    fn drop(&mut self) {
        self.release_held();
    }
}
