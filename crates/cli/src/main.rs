#![deny(unsafe_code)]
//! CLI binary for the icon-tint SVG icon recoloring tool.
//!
//! Subcommands:
//! - `generate <input.svg>` — recolor an icon, write active/inactive variants
//! - `palette` — print the inactive palette derived from a base color

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use icon_tint_core::{
    derive_inactive_background, derive_inactive_color, generate, ColorToken, GenerationOptions,
    IconVariant, DEFAULT_CORNER_RADIUS, DEFAULT_INACTIVE_MIX, DEFAULT_INSET_RATIO,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "icon-tint", about = "SVG icon recoloring tool")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recolor an SVG icon and write its variants next to the input.
    Generate {
        /// Input SVG file.
        input: PathBuf,

        /// Fill color: "none" or hex like "#ff0000".
        #[arg(short, long)]
        fill: Option<String>,

        /// Stroke color: "none" or hex.
        #[arg(short, long)]
        stroke: Option<String>,

        /// Leave existing fill="none" values untouched.
        #[arg(long)]
        preserve_fill_none: bool,

        /// Leave existing stroke="none" values untouched.
        #[arg(long)]
        preserve_stroke_none: bool,

        /// Also generate the desaturated inactive variant.
        #[arg(long)]
        inactive: bool,

        /// Inactive mix ratio in [0, 1].
        #[arg(long, default_value_t = DEFAULT_INACTIVE_MIX)]
        mix: f64,

        /// Corner radius of the inactive background rectangle.
        #[arg(long, default_value_t = DEFAULT_CORNER_RADIUS)]
        corner_radius: f64,

        /// Inset ratio of the inactive background rectangle in [0, 0.9].
        #[arg(long, default_value_t = DEFAULT_INSET_RATIO)]
        inset: f64,

        /// Output directory (defaults to the input file's directory).
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Overwrite existing output files.
        #[arg(long)]
        force: bool,
    },
    /// Print the inactive foreground/background derived from a base color.
    Palette {
        /// Base color: "none" or hex.
        #[arg(short, long)]
        color: String,

        /// Inactive mix ratio in [0, 1].
        #[arg(long, default_value_t = DEFAULT_INACTIVE_MIX)]
        mix: f64,
    },
}

/// Builds the output path for one variant: `<out_dir>/<stem>-<variant>.svg`.
fn variant_path(out_dir: &Path, stem: &str, variant: &str) -> PathBuf {
    out_dir.join(format!("{stem}-{variant}.svg"))
}

/// Writes every variant, refusing to clobber existing files unless forced.
fn write_variants(
    variants: &[IconVariant],
    out_dir: &Path,
    stem: &str,
    force: bool,
) -> Result<Vec<PathBuf>, CliError> {
    let paths: Vec<PathBuf> = variants
        .iter()
        .map(|v| variant_path(out_dir, stem, &v.name))
        .collect();
    if !force {
        for path in &paths {
            if path.exists() {
                return Err(CliError::Input(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
        }
    }
    for (variant, path) in variants.iter().zip(&paths) {
        fs::write(path, &variant.svg)
            .map_err(|e| CliError::Io(format!("failed to write {}: {e}", path.display())))?;
    }
    Ok(paths)
}

fn parse_color(text: &str) -> Result<ColorToken, CliError> {
    ColorToken::parse(text).map_err(CliError::from)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Palette { color, mix } => {
            let base = parse_color(&color)?;
            let foreground = derive_inactive_color(base, mix);
            let background = derive_inactive_background(base, mix);
            if cli.json {
                let info = serde_json::json!({
                    "base": base,
                    "mix": mix,
                    "inactive": foreground,
                    "background": background,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("base:       {}", base.to_css());
                println!("inactive:   {}", foreground.to_css());
                println!("background: {}", background.to_css());
            }
        }
        Command::Generate {
            input,
            fill,
            stroke,
            preserve_fill_none,
            preserve_stroke_none,
            inactive,
            mix,
            corner_radius,
            inset,
            out_dir,
            force,
        } => {
            let svg = fs::read_to_string(&input)
                .map_err(|e| CliError::Io(format!("failed to read {}: {e}", input.display())))?;
            let fill = fill.as_deref().map(parse_color).transpose()?;
            let stroke = stroke.as_deref().map(parse_color).transpose()?;

            let options = GenerationOptions {
                svg,
                fill,
                stroke,
                preserve_fill_none,
                preserve_stroke_none,
                generate_inactive: inactive,
                inactive_mix: mix,
                corner_radius,
                inset_ratio: inset,
            };
            let variants = generate(&options)?;

            let out_dir = out_dir.unwrap_or_else(|| {
                input
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("icon");
            let paths = write_variants(&variants, &out_dir, stem, force)?;

            if cli.json {
                let report: Vec<_> = variants
                    .iter()
                    .zip(&paths)
                    .map(|(variant, path)| {
                        serde_json::json!({
                            "name": variant.name,
                            "path": path.display().to_string(),
                            "fill": variant.fill,
                            "stroke": variant.stroke,
                            "background": variant.background,
                        })
                    })
                    .collect();
                let info = serde_json::json!({ "variants": report });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for path in &paths {
                    eprintln!("wrote {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
