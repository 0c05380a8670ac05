//! GTK4 host for a [`PlotSurface`] painted with Cairo.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::{debug, warn};

use crate::error::PlotResult;
use crate::export::{PngExporter, RasterImage};
use crate::input::{InputTranslator, KeyboardState, ModifierKeys};
use crate::interaction::SharedController;
use crate::model::ModelHandle;
use crate::render::CairoRenderContext;
use crate::surface::{
    PaintOutcome, PlotInvalidator, PlotSurface, PlotSurfaceConfig, RedrawRequester, SurfaceHost,
};

/// Interval at which redraw requests from other threads are picked up.
const REDRAW_POLL: Duration = Duration::from_millis(16);

pub type GtkPlotSurface = PlotSurface<CairoRenderContext>;

/// Reads the live modifier state of the default seat's keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct GdkKeyboardState;

impl KeyboardState for GdkKeyboardState {
    fn modifiers(&self) -> ModifierKeys {
        let state = gdk::Display::default()
            .and_then(|display| display.default_seat())
            .and_then(|seat| seat.keyboard())
            .map(|keyboard| keyboard.modifier_state())
            .unwrap_or_else(gdk::ModifierType::empty);
        modifiers_from_gdk(state)
    }
}

#[must_use]
pub fn modifiers_from_gdk(state: gdk::ModifierType) -> ModifierKeys {
    let mut modifiers = ModifierKeys::NONE;
    modifiers.set(ModifierKeys::SHIFT, state.contains(gdk::ModifierType::SHIFT_MASK));
    modifiers.set(ModifierKeys::CONTROL, state.contains(gdk::ModifierType::CONTROL_MASK));
    modifiers.set(ModifierKeys::ALT, state.contains(gdk::ModifierType::ALT_MASK));
    modifiers.set(
        ModifierKeys::WINDOWS,
        state.intersects(gdk::ModifierType::SUPER_MASK | gdk::ModifierType::META_MASK),
    );
    modifiers
}

/// Flags a repaint; the main loop turns it into `queue_draw`.
#[derive(Debug, Default)]
struct GtkRedraw {
    pending: AtomicBool,
}

impl RedrawRequester for GtkRedraw {
    fn request_redraw(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

struct GtkHost {
    drawing_area: glib::WeakRef<gtk::DrawingArea>,
}

impl SurfaceHost for GtkHost {
    fn set_cursor(&mut self, name: &str) {
        if let Some(area) = self.drawing_area.upgrade() {
            area.set_cursor_from_name(Some(name));
        }
    }

    fn set_clipboard_text(&mut self, text: &str) {
        if let Some(area) = self.drawing_area.upgrade() {
            area.clipboard().set_text(text);
        }
    }

    fn set_clipboard_image(&mut self, image: &RasterImage) {
        let Some(area) = self.drawing_area.upgrade() else {
            return;
        };
        let (Ok(width), Ok(height)) =
            (i32::try_from(image.width()), i32::try_from(image.height()))
        else {
            warn!(
                width = image.width(),
                height = image.height(),
                "image too large for clipboard"
            );
            return;
        };
        let format = if cfg!(target_endian = "little") {
            gdk::MemoryFormat::B8g8r8a8Premultiplied
        } else {
            gdk::MemoryFormat::A8r8g8b8Premultiplied
        };
        let bytes = glib::Bytes::from(image.data());
        let texture = gdk::MemoryTexture::new(width, height, format, &bytes, image.stride());
        area.clipboard().set_texture(&texture);
    }
}

/// A `DrawingArea` displaying a plot model.
///
/// Input is translated and forwarded to the surface's controller; paints
/// happen in the draw function. Invalidation from worker threads goes
/// through [`ModelHandle::invalidate_plot`] or [`GtkPlotView::invalidator`].
pub struct GtkPlotView {
    drawing_area: gtk::DrawingArea,
    surface: Rc<RefCell<GtkPlotSurface>>,
    invalidator: PlotInvalidator,
}

impl Default for GtkPlotView {
    fn default() -> Self {
        Self::new()
    }
}

impl GtkPlotView {
    #[must_use]
    pub fn new() -> Self {
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);

        let redraw = Arc::new(GtkRedraw::default());
        let host = GtkHost {
            drawing_area: drawing_area.downgrade(),
        };
        let surface = PlotSurface::new(
            CairoRenderContext::new(),
            Box::new(host),
            Arc::clone(&redraw) as Arc<dyn RedrawRequester>,
        )
        .with_exporter(Box::new(PngExporter::default()));
        let invalidator = surface.invalidator();
        let surface = Rc::new(RefCell::new(surface));

        install_draw_func(&drawing_area, &surface);
        install_input(&drawing_area, &surface);
        install_redraw_poll(&drawing_area, redraw);

        {
            let surface = Rc::clone(&surface);
            drawing_area.connect_destroy(move |_| {
                if let Ok(mut surface) = surface.try_borrow_mut() {
                    surface.dispose();
                }
            });
        }

        Self {
            drawing_area,
            surface,
            invalidator,
        }
    }

    pub fn with_config(self, config: PlotSurfaceConfig) -> PlotResult<Self> {
        self.surface.borrow_mut().set_config(config)?;
        Ok(self)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    pub fn set_model(&self, model: Option<ModelHandle>) {
        self.update_surface(|surface| surface.set_model(model));
    }

    #[must_use]
    pub fn model(&self) -> Option<ModelHandle> {
        self.surface
            .try_borrow()
            .ok()
            .and_then(|surface| surface.model())
    }

    pub fn set_controller(&self, controller: Option<SharedController>) {
        self.update_surface(|surface| surface.set_controller(controller));
    }

    /// Controller receiving input; `None` while an input callback runs.
    #[must_use]
    pub fn actual_controller(&self) -> Option<SharedController> {
        self.surface
            .try_borrow()
            .ok()
            .map(|surface| surface.actual_controller())
    }

    pub fn invalidate_plot(&self, update_data: bool) {
        self.invalidator.invalidate_plot(update_data);
    }

    #[must_use]
    pub fn invalidator(&self) -> PlotInvalidator {
        self.invalidator.clone()
    }

    /// Runs `f` on the surface unless it is already borrowed by a callback.
    pub fn update_surface<T>(&self, f: impl FnOnce(&mut GtkPlotSurface) -> T) -> Option<T> {
        match self.surface.try_borrow_mut() {
            Ok(mut surface) => Some(f(&mut surface)),
            Err(_) => {
                warn!("plot surface busy, update skipped");
                None
            }
        }
    }
}

fn install_draw_func(drawing_area: &gtk::DrawingArea, surface: &Rc<RefCell<GtkPlotSurface>>) {
    drawing_area.set_draw_func({
        let surface = Rc::clone(surface);
        move |_widget, context, width, height| {
            let Ok(mut surface) = surface.try_borrow_mut() else {
                return;
            };
            surface.resize(
                u32::try_from(width).unwrap_or(0),
                u32::try_from(height).unwrap_or(0),
            );
            surface.render_context_mut().set_target(Some(context.clone()));
            if let PaintOutcome::Failed { message } = surface.paint() {
                debug!(%message, "gtk plot paint failed");
            }
            surface.render_context_mut().set_target(None);
        }
    });

    let surface = Rc::clone(surface);
    drawing_area.connect_resize(move |_, width, height| {
        if let Ok(mut surface) = surface.try_borrow_mut() {
            surface.resize(
                u32::try_from(width).unwrap_or(0),
                u32::try_from(height).unwrap_or(0),
            );
        }
    });
}

fn install_redraw_poll(drawing_area: &gtk::DrawingArea, redraw: Arc<GtkRedraw>) {
    let area = drawing_area.downgrade();
    glib::timeout_add_local(REDRAW_POLL, move || {
        let Some(area) = area.upgrade() else {
            return glib::ControlFlow::Break;
        };
        if redraw.pending.swap(false, Ordering::AcqRel) {
            area.queue_draw();
        }
        glib::ControlFlow::Continue
    });
}

fn install_input(drawing_area: &gtk::DrawingArea, surface: &Rc<RefCell<GtkPlotSurface>>) {
    let translator = Rc::new(InputTranslator::new(GdkKeyboardState));
    let pointer = Rc::new(Cell::new((0.0, 0.0)));

    let click = gtk::GestureClick::new();
    click.set_button(0);
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        let area = drawing_area.downgrade();
        click.connect_pressed(move |gesture, n_press, x, y| {
            if let Some(area) = area.upgrade() {
                area.grab_focus();
            }
            let click_count = u32::try_from(n_press).unwrap_or(1);
            let event = translator.mouse_down(x, y, gesture.current_button(), click_count);
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.handle_mouse_down(&event);
            }
        });
    }
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        click.connect_released(move |gesture, _n_press, x, y| {
            let event = translator.mouse_up(x, y, gesture.current_button());
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.handle_mouse_up(&event);
            }
        });
    }
    drawing_area.add_controller(click);

    let motion = gtk::EventControllerMotion::new();
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        let pointer = Rc::clone(&pointer);
        motion.connect_motion(move |_, x, y| {
            pointer.set((x, y));
            let event = translator.mouse_move(x, y);
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.handle_mouse_move(&event);
            }
        });
    }
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        let pointer = Rc::clone(&pointer);
        motion.connect_enter(move |_, x, y| {
            pointer.set((x, y));
            let event = translator.mouse_enter(x, y);
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.handle_mouse_enter(&event);
            }
        });
    }
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        let pointer = Rc::clone(&pointer);
        motion.connect_leave(move |_| {
            let (x, y) = pointer.get();
            let event = translator.mouse_leave(x, y);
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.handle_mouse_leave(&event);
            }
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let surface = Rc::clone(surface);
        let translator = Rc::clone(&translator);
        let pointer = Rc::clone(&pointer);
        scroll.connect_scroll(move |_, _dx, dy| {
            let (x, y) = pointer.get();
            let event = translator.wheel(x, y, dy);
            let handled = surface
                .try_borrow_mut()
                .map(|mut surface| surface.handle_mouse_wheel(&event))
                .unwrap_or(false);
            if handled {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
    }
    drawing_area.add_controller(scroll);

    let keys = gtk::EventControllerKey::new();
    {
        let surface = Rc::clone(surface);
        keys.connect_key_pressed(move |_, keyval, _keycode, _state| {
            let Some(name) = keyval.name() else {
                return glib::Propagation::Proceed;
            };
            let event = translator.key_down(&name);
            let handled = surface
                .try_borrow_mut()
                .map(|mut surface| surface.handle_key_down(&event))
                .unwrap_or(false);
            if handled {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
    }
    drawing_area.add_controller(keys);
}
