//! Command-line argument definitions for the classgram CLI.
//!
//! [`Args`] is parsed with [`clap`]. Besides the input and output paths it
//! carries the view options applied to the exported SVG: hidden relationship
//! kinds and the zoom factor.

use clap::Parser;

use classgram::model::RelationshipKind;

/// Command-line arguments for the classgram diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON class diagram description
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Hide relationships of a kind; accepts the same synonyms as the input
    /// (e.g. `inherits`, `uses`). May be repeated.
    #[arg(long = "hide", value_name = "KIND")]
    pub hide: Vec<RelationshipKind>,

    /// Zoom factor applied to the exported SVG
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    pub zoom: f32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["classgram", "diagram.json"]).unwrap();

        assert_eq!(args.input, "diagram.json");
        assert_eq!(args.output, "out.svg");
        assert!(args.config.is_none());
        assert!(args.hide.is_empty());
        assert_eq!(args.zoom, 1.0);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_hide_is_repeatable_and_normalized() {
        let args = Args::try_parse_from([
            "classgram",
            "diagram.json",
            "--hide",
            "Inherits",
            "--hide",
            "uses",
        ])
        .unwrap();

        assert_eq!(
            args.hide,
            [RelationshipKind::Inheritance, RelationshipKind::Dependency]
        );
    }

    #[test]
    fn test_zoom_and_output() {
        let args =
            Args::try_parse_from(["classgram", "in.json", "-o", "x.svg", "--zoom", "2.5"]).unwrap();

        assert_eq!(args.output, "x.svg");
        assert_eq!(args.zoom, 2.5);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Args::try_parse_from(["classgram"]).is_err());
    }
}
