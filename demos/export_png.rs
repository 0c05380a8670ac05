#[path = "shared/sine_model.rs"]
mod sine_model;

use std::path::Path;

use plotview::export::{PngExporter, SvgExporter};
use plotview::model::ModelHandle;

use sine_model::{PhaseSource, SineModel};

fn main() {
    let _ = plotview::telemetry::init_default_tracing();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sine.png".to_owned());
    let model = ModelHandle::new(SineModel::new("sin(x)", PhaseSource::default()));

    let exporter = PngExporter::new(800, 450).with_resolution(144.0);
    if let Err(err) = exporter.export_to_file(&model, &path) {
        eprintln!("export failed: {err}");
        std::process::exit(1);
    }
    println!("wrote {path}");

    let svg_path = Path::new(&path).with_extension("svg");
    if let Err(err) = SvgExporter::new(800, 450).export_to_file(&model, &svg_path) {
        eprintln!("svg export failed: {err}");
        std::process::exit(1);
    }
    println!("wrote {}", svg_path.display());
}
