//! Built-in key commands.

use std::sync::Arc;

use tracing::warn;

use crate::input::PlotKeyEvent;
use crate::interaction::PlotView;

/// Action bound to a key chord. Returns whether the key was handled.
pub type KeyCommand = Arc<dyn Fn(&mut dyn PlotView, &PlotKeyEvent) -> bool + Send + Sync>;

#[must_use]
pub fn from_fn(
    command: impl Fn(&mut dyn PlotView, &PlotKeyEvent) -> bool + Send + Sync + 'static,
) -> KeyCommand {
    Arc::new(command)
}

/// Copies the current render to the clipboard as an image.
#[must_use]
pub fn copy_image() -> KeyCommand {
    from_fn(|view, _event| match view.copy_image_to_clipboard() {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "copy to clipboard failed");
            false
        }
    })
}

/// Puts a fixed text on the clipboard.
#[must_use]
pub fn copy_text(text: impl Into<String>) -> KeyCommand {
    let text = text.into();
    from_fn(move |view, _event| {
        view.set_clipboard_text(&text);
        true
    })
}

/// Restores the model's default axis ranges.
#[must_use]
pub fn reset_axes() -> KeyCommand {
    from_fn(|view, _event| {
        let Some(model) = view.actual_model() else {
            return false;
        };
        model.with(|model| model.reset_axes());
        view.invalidate_plot(false);
        true
    })
}
