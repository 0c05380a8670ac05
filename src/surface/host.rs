use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::export::RasterImage;

/// Toolkit services a surface needs on the UI thread.
pub trait SurfaceHost {
    /// Shows the cursor with the given CSS/freedesktop name.
    fn set_cursor(&mut self, name: &str);

    fn set_clipboard_text(&mut self, text: &str);

    fn set_clipboard_image(&mut self, image: &RasterImage);
}

/// Schedules a repaint of the hosting widget.
///
/// Called from whichever thread invalidated the plot; implementations must
/// only enqueue work and return.
pub trait RedrawRequester: Send + Sync {
    fn request_redraw(&self);
}

/// Redraw requester for surfaces painted on demand by their owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedraw;

impl RedrawRequester for NoRedraw {
    fn request_redraw(&self) {}
}

/// Redraw requester that only counts requests.
#[derive(Debug, Default)]
pub struct CountingRedraw {
    requests: AtomicUsize,
}

impl CountingRedraw {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RedrawRequester for CountingRedraw {
    fn request_redraw(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default, Clone)]
pub struct HeadlessHostState {
    pub cursor: Option<String>,
    pub cursor_changes: usize,
    pub clipboard_text: Option<String>,
    pub clipboard_image: Option<RasterImage>,
}

/// In-memory host for headless surfaces.
///
/// Clones share state, so a test can keep one clone and hand the other to
/// the surface.
#[derive(Debug, Default, Clone)]
pub struct HeadlessHost {
    state: Arc<Mutex<HeadlessHostState>>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> HeadlessHostState {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<String> {
        self.state.lock().cursor.clone()
    }

    #[must_use]
    pub fn clipboard_text(&self) -> Option<String> {
        self.state.lock().clipboard_text.clone()
    }

    #[must_use]
    pub fn clipboard_image(&self) -> Option<RasterImage> {
        self.state.lock().clipboard_image.clone()
    }
}

impl SurfaceHost for HeadlessHost {
    fn set_cursor(&mut self, name: &str) {
        let mut state = self.state.lock();
        if state.cursor.as_deref() != Some(name) {
            state.cursor = Some(name.to_owned());
            state.cursor_changes += 1;
        }
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.state.lock().clipboard_text = Some(text.to_owned());
    }

    fn set_clipboard_image(&mut self, image: &RasterImage) {
        self.state.lock().clipboard_image = Some(image.clone());
    }
}
