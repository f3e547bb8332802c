//! CLI logic for the classgram class diagram renderer.
//!
//! [`run`] loads configuration, parses the JSON input, renders it and writes
//! the SVG, applying the view options given on the command line.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use log::{debug, info};

use classgram::{ClassgramError, DiagramBuilder, KindVisibility};

/// Run the classgram CLI application
///
/// Reads `args.input`, renders it with the loaded configuration and writes
/// the SVG to `args.output`. Relationship kinds listed in `args.hide` are
/// left out of the output and `args.zoom` scales the document size.
///
/// # Errors
///
/// Returns `ClassgramError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ClassgramError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    config::validate_zoom(args.zoom)?;

    let source = std::fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;
    let mut rendered = builder.render(&diagram)?;

    let visibility: KindVisibility = args.hide.iter().copied().collect();
    debug!(hidden:? = args.hide, zoom = args.zoom; "Applying view options");
    rendered.set_visibility(visibility);
    rendered.set_zoom(args.zoom);

    rendered.write_svg(&args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
