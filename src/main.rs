use clap::{Parser, Subcommand};
use shotcard::batch;
use shotcard::export::{self, DEFAULT_JPEG_QUALITY, OutputFormat};
use shotcard::render::RenderEngine;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shotcard")]
#[command(about = "Render photos and their EXIF shooting data into poster cards")]
#[command(long_about = "\
Render photos and their EXIF shooting data into poster cards

Each poster frames the photo on a designed canvas with the camera model,
lens, and exposure parameters typeset underneath. Metadata is read from the
photo's own EXIF block; anything missing is shown as a placeholder rather
than failing the render.

Templates:

  classic           White background, photo above a centered text stack
  blur-background   Frosted-glass border blurred from the photo itself

An unrecognized template name falls back to the default (classic) with a
warning, so scripts keep working across template renames.

Output names default to <input-stem>_poster.<ext> next to the input file;
batch runs pack everything into a single zip archive.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one photo into a poster
    Render {
        /// Input photo (JPEG, PNG, TIFF, or WebP)
        image: PathBuf,

        /// Template id
        #[arg(long, default_value = "classic")]
        template: String,

        /// Output format: png or jpg
        #[arg(long, default_value = "png")]
        format: OutputFormat,

        /// JPEG quality as a fraction in (0, 1]
        #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
        quality: f32,

        /// Output path (default: <input-stem>_poster.<ext> next to the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render many photos and pack the posters into a zip
    Batch {
        /// Input photos
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Template id
        #[arg(long, default_value = "classic")]
        template: String,

        /// Output format: png or jpg
        #[arg(long, default_value = "jpg")]
        format: OutputFormat,

        /// JPEG quality as a fraction in (0, 1]
        #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
        quality: f32,

        /// Archive path (default: posters_<timestamp>.zip)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the available templates
    Templates {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let engine = RenderEngine::builtin();

    match cli.command {
        Command::Render {
            image,
            template,
            format,
            quality,
            output,
        } => {
            let bytes = std::fs::read(&image)?;
            let filename = image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (poster, _meta) = engine.render(&template, &bytes, &filename)?;
            let encoded = export::export(&poster, format, quality)?;
            let path = output.unwrap_or_else(|| default_output_path(&image, format));
            std::fs::write(&path, encoded)?;
            println!("Wrote {}", path.display());
        }
        Command::Batch {
            images,
            template,
            format,
            quality,
            output,
        } => {
            let jobs = images
                .iter()
                .map(|path| {
                    Ok(batch::RenderJob {
                        original_name: path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned()),
                        bytes: std::fs::read(path)?,
                    })
                })
                .collect::<Result<Vec<_>, std::io::Error>>()?;
            let result = batch::run(&engine, &jobs, &template, format, quality)?;
            let path = output.unwrap_or_else(default_archive_path);
            std::fs::write(&path, result.archive)?;
            println!(
                "Wrote {} ({} ok, {} failed)",
                path.display(),
                result.succeeded,
                result.failed
            );
        }
        Command::Templates { json } => {
            let templates = engine.templates();
            if json {
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else {
                for t in &templates {
                    println!("{:<16} {:<18} {}", t.id, t.name, t.description);
                }
            }
        }
    }

    Ok(())
}

fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "poster".to_string());
    input.with_file_name(format!("{stem}_poster.{}", format.extension()))
}

fn default_archive_path() -> PathBuf {
    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("posters_{epoch}.zip"))
}
