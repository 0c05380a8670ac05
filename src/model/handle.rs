use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::core::SurfaceId;
use crate::model::PlotModel;

/// Route from a model back to the surface currently displaying it.
pub(crate) trait ViewLink: Send + Sync {
    fn invalidate_plot(&self, update_data: bool);
}

#[derive(Clone)]
struct ViewRegistration {
    surface_id: SurfaceId,
    link: Weak<dyn ViewLink>,
}

struct ModelShared {
    sync_root: Mutex<Box<dyn PlotModel>>,
    view: Mutex<Option<ViewRegistration>>,
}

/// Exclusive access to a model, held through its sync root.
pub type ModelGuard<'a> = MutexGuard<'a, Box<dyn PlotModel>>;

/// Shared, application-owned reference to a [`PlotModel`].
///
/// Cloning is cheap and clones compare equal under [`ModelHandle::ptr_eq`].
/// The handle's mutex is the model's sync root: surfaces hold it for a whole
/// update-and-render pass, and any thread mutating chart data must hold it too.
///
/// The handle also remembers which surface is its active view. That link is
/// weak and only routes [`ModelHandle::invalidate_plot`]; it never keeps a
/// surface alive.
#[derive(Clone)]
pub struct ModelHandle {
    shared: Arc<ModelShared>,
}

impl ModelHandle {
    #[must_use]
    pub fn new(model: impl PlotModel + 'static) -> Self {
        Self::from_boxed(Box::new(model))
    }

    #[must_use]
    pub fn from_boxed(model: Box<dyn PlotModel>) -> Self {
        Self {
            shared: Arc::new(ModelShared {
                sync_root: Mutex::new(model),
                view: Mutex::new(None),
            }),
        }
    }

    /// Locks the sync root.
    pub fn lock(&self) -> ModelGuard<'_> {
        self.shared.sync_root.lock()
    }

    /// Locks the sync root unless another holder has it.
    pub fn try_lock(&self) -> Option<ModelGuard<'_>> {
        self.shared.sync_root.try_lock()
    }

    /// Runs `f` with the sync root held.
    pub fn with<T>(&self, f: impl FnOnce(&mut dyn PlotModel) -> T) -> T {
        let mut guard = self.lock();
        f(guard.as_mut())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Surface currently registered as this model's active view.
    #[must_use]
    pub fn attached_view(&self) -> Option<SurfaceId> {
        self.shared
            .view
            .lock()
            .as_ref()
            .map(|registration| registration.surface_id)
    }

    #[must_use]
    pub fn is_attached_to(&self, surface_id: SurfaceId) -> bool {
        self.attached_view() == Some(surface_id)
    }

    /// Asks the attached view, if any, to repaint.
    ///
    /// Safe to call from any thread. Returns `false` when no live view is
    /// attached.
    pub fn invalidate_plot(&self, update_data: bool) -> bool {
        let registration = self.shared.view.lock().clone();
        let Some(registration) = registration else {
            trace!(update_data, "invalidate on detached model ignored");
            return false;
        };
        match registration.link.upgrade() {
            Some(link) => {
                link.invalidate_plot(update_data);
                true
            }
            None => {
                debug!(
                    surface = registration.surface_id.get(),
                    "attached view is gone"
                );
                false
            }
        }
    }

    pub(crate) fn attach_view(&self, surface_id: SurfaceId, link: Weak<dyn ViewLink>) {
        let previous = self.shared.view.lock().replace(ViewRegistration { surface_id, link });
        if let Some(previous) = previous.filter(|previous| previous.surface_id != surface_id) {
            debug!(
                from = previous.surface_id.get(),
                to = surface_id.get(),
                "model re-attached to another surface"
            );
        }
    }

    /// Clears the view link if it still points at `surface_id`.
    pub(crate) fn detach_view(&self, surface_id: SurfaceId) -> bool {
        let mut view = self.shared.view.lock();
        match view.as_ref() {
            Some(registration) if registration.surface_id == surface_id => {
                *view = None;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("ptr", &Arc::as_ptr(&self.shared))
            .field("attached_view", &self.attached_view())
            .finish()
    }
}
