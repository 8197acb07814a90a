//! CLI logic for the Annoview renderer.
//!
//! Reads a model file, renders its Icon and Diagram annotations and writes
//! one SVG file per view that rendered.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use annoview::{AnnoviewError, ViewBuilder, view::ViewKind};
use annoview_parser::ModelSource;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// SVG files written, Icon first.
    pub written: Vec<PathBuf>,
    /// Views that failed to render or export.
    pub failures: Vec<(ViewKind, AnnoviewError)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the Annoview CLI application
///
/// Each view is rendered and exported on its own, so a failing view is
/// recorded in the returned [`RunReport`] while the other is still written.
///
/// # Errors
///
/// Returns `AnnoviewError` when the configuration cannot be loaded, the
/// input file cannot be read, or the output directory cannot be created.
pub fn run(args: &Args) -> Result<RunReport, AnnoviewError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;
    let builder = ViewBuilder::new(app_config);

    if args.dump_document {
        for view in ViewKind::ALL {
            match builder.parse_view(&source, view) {
                Ok(document) => println!("{view}: {document}"),
                Err(err) => warn!(view:?, err:%; "Cannot dump annotation document"),
            }
        }
    }

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;
    let stem = output_stem(&source, Path::new(&args.input));

    let mut report = RunReport::default();
    let views = builder.render(&source);
    for (view, result) in [
        (ViewKind::Icon, views.icon),
        (ViewKind::Diagram, views.diagram),
    ] {
        let exported = result.and_then(|rendered| {
            for warning in rendered.warnings() {
                warn!(view:?, warning = warning.as_str(); "View rendered with warning");
            }
            let path = output_dir.join(format!("{stem}_{}.svg", view.slug()));
            builder.export_svg(&rendered, &path).map(|()| path)
        });

        match exported {
            Ok(path) => {
                info!(view:?, output_file = path.display().to_string(); "SVG exported successfully");
                report.written.push(path);
            }
            Err(err) => report.failures.push((view, err)),
        }
    }

    Ok(report)
}

/// The model name, or the input file stem when the model cannot be named.
fn output_stem(source: &str, input: &Path) -> String {
    let model = ModelSource::new(source);

    model.model_name().map(str::to_string).unwrap_or_else(|| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stem_uses_model_name() {
        let stem = output_stem("model TubeFlow\nend TubeFlow;", Path::new("models/tube.mo"));
        assert_eq!(stem, "TubeFlow");
    }

    #[test]
    fn test_output_stem_falls_back_to_file_name() {
        let stem = output_stem("block Valve\nend Valve;", Path::new("models/valve.mo"));
        assert_eq!(stem, "valve");

        let stem = output_stem("\"unterminated model", Path::new("broken.mo"));
        assert_eq!(stem, "broken");
    }
}
