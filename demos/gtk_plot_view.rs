#[path = "shared/sine_model.rs"]
mod sine_model;

use std::thread;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::prelude::*;

use plotview::model::ModelHandle;
use plotview::platform_gtk::GtkPlotView;

use sine_model::{PhaseSource, SineModel};

fn main() {
    let _ = plotview::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.plotview.examples.gtk-plot-view")
        .build();

    app.connect_activate(|app| {
        let phase = PhaseSource::default();
        let model = ModelHandle::new(SineModel::new("sin(x + t)", phase.clone()));
        let view = GtkPlotView::new();
        view.set_model(Some(model.clone()));

        // Producer off the UI thread; the next paint pulls the new phase.
        thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_millis(40));
                phase.advance(0.05);
                model.invalidate_plot(true);
            }
        });

        let info = gtk::Label::new(Some(
            "Left drag: tracker | Right drag: pan | Middle or Ctrl+left drag: zoom | Wheel: zoom | A: reset | Ctrl+C: copy",
        ));
        info.set_xalign(0.0);

        let layout = gtk::Box::new(gtk::Orientation::Vertical, 6);
        layout.append(view.drawing_area());
        layout.append(&info);

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("plotview | live sine")
            .default_width(960)
            .default_height(600)
            .build();
        window.set_child(Some(&layout));
        window.present();
    });

    let _ = app.run();
}
