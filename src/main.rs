use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use agroarea::config::{AreaModel, EditorConfig, FileConfig};
use agroarea::domain::{Hectares, Vertex};
use agroarea::editor::VertexEditor;
use agroarea::geometry::{
    Bounds, centroid, edge_midpoints, haversine_distance, interpolate, perimeter_m,
    polygon_area_hectares, provider_for,
};
use agroarea::persist::{load_polygon, write_payload};
use agroarea::session::{load_script, replay};

/// Measure and edit farm-area polygons
///
/// Examples:
///   # Distance between two points
///   agroarea distance -12.0464,-77.0428 -12.0500,-77.0400
///
///   # Area, perimeter and center of a stored area
///   agroarea area lote3.json
///
///   # Replay a recorded editing session and write the save payload
///   agroarea replay session.json -o lote3-saved.json
///
///   # Area of every polygon in a directory
///   agroarea report ./areas --model geodesic
#[derive(Parser, Debug)]
#[command(name = "agroarea")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches agroarea.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum area in hectares accepted when completing a drawing
    #[arg(long, global = true)]
    max_area: Option<f64>,

    /// Spacing in meters for the interpolate command
    #[arg(long, global = true)]
    spacing: Option<f64>,

    /// Area model used for measurements
    #[arg(long, global = true, value_enum)]
    model: Option<AreaModel>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Great-circle distance between two "lat,lng" points
    Distance {
        #[arg(value_parser = parse_vertex, allow_hyphen_values = true)]
        from: Vertex,
        #[arg(value_parser = parse_vertex, allow_hyphen_values = true)]
        to: Vertex,
    },
    /// Evenly spaced points between two "lat,lng" points
    Interpolate {
        #[arg(value_parser = parse_vertex, allow_hyphen_values = true)]
        from: Vertex,
        #[arg(value_parser = parse_vertex, allow_hyphen_values = true)]
        to: Vertex,
    },
    /// Edge midpoints of a stored polygon
    Midpoints { polygon: PathBuf },
    /// Area, perimeter and center of a stored polygon
    Area { polygon: PathBuf },
    /// Replay a JSON script of editing events
    Replay {
        script: PathBuf,
        /// Where to write the save payload, if the script saves
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Area of every polygon file in a directory
    Report { dir: PathBuf },
}

fn parse_vertex(s: &str) -> Result<Vertex, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    Vertex::new(lat, lng).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    init_logging(verbose);

    let mut editor_config = file_config
        .as_ref()
        .map(FileConfig::editor_config)
        .unwrap_or_default();
    if let Some(max_area) = args.max_area {
        editor_config = editor_config.with_max_area(max_area);
    }
    if let Some(spacing) = args.spacing {
        editor_config = editor_config.with_spacing(spacing);
    }
    let model = args
        .model
        .or_else(|| file_config.as_ref().and_then(|c| c.area_model))
        .unwrap_or_default();

    if verbose {
        println!("Configuration:");
        println!("  Max area: {}", Hectares(editor_config.max_area_hectares));
        println!("  Spacing: {}m", editor_config.midpoint_spacing_m);
        println!("  Earth radius: {}m", editor_config.earth_radius_m);
        println!("  Area model: {:?}", model);
        println!();
    }

    match args.command {
        Command::Distance { from, to } => {
            let d = haversine_distance(&from, &to, editor_config.earth_radius_m);
            println!("{from} -> {to}: {d:.2} m");
        }
        Command::Interpolate { from, to } => {
            let points = interpolate(
                &from,
                &to,
                editor_config.midpoint_spacing_m,
                editor_config.earth_radius_m,
            );
            println!(
                "{} points every {}m between {from} and {to}",
                points.len(),
                editor_config.midpoint_spacing_m
            );
            for p in points {
                println!("  {p}");
            }
        }
        Command::Midpoints { polygon } => {
            let vertices = load_polygon(&polygon)?;
            let midpoints = edge_midpoints(&vertices);
            println!("{}", serde_json::to_string_pretty(&midpoints)?);
        }
        Command::Area { polygon } => {
            let vertices = load_polygon(&polygon)?;
            print_area_summary(&vertices, model, &editor_config);
        }
        Command::Replay { script, output } => {
            run_replay(&script, output.as_deref(), model, editor_config)?;
        }
        Command::Report { dir } => {
            run_report(&dir, model, editor_config.earth_radius_m)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // try_init only fails when a subscriber is already installed, which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_area_summary(vertices: &[Vertex], model: AreaModel, config: &EditorConfig) {
    let provider = provider_for(model, config.earth_radius_m);
    let area = polygon_area_hectares(&provider, vertices);
    let limit = Hectares(config.max_area_hectares);

    println!("Vertices:  {}", vertices.len());
    println!("Area:      {area}");
    println!(
        "Perimeter: {:.1} m",
        perimeter_m(vertices, config.earth_radius_m)
    );
    if let Some(center) = centroid(vertices) {
        println!("Center:    {center}");
    }
    if let Some(bounds) = Bounds::from_vertices(vertices) {
        println!(
            "Extent:    {:.6}° lat x {:.6}° lng",
            bounds.lat_span(),
            bounds.lng_span()
        );
    }
    if area > limit {
        println!("Warning: exceeds the {limit} limit for new drawings");
    }
}

fn run_replay(
    script: &Path,
    output: Option<&Path>,
    model: AreaModel,
    config: EditorConfig,
) -> Result<()> {
    let events = load_script(script)?;
    let mut editor = VertexEditor::new(config, provider_for(model, config.earth_radius_m));
    let report = replay(&mut editor, &events);

    println!(
        "Applied {}/{} events, final state: {}",
        report.applied,
        events.len(),
        report.state
    );
    for note in &report.notifications {
        println!("  [{}] {}: {}", note.step, note.event, note.message);
    }

    match (&report.saved, output) {
        (Some(payload), Some(path)) => {
            write_payload(path, payload)?;
            println!(
                "Saved {} points, {} ha -> {}",
                payload.coordenadas.len(),
                payload.area,
                path.display()
            );
        }
        (Some(payload), None) => {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
        (None, _) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn run_report(dir: &Path, model: AreaModel, radius_m: f64) -> Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("No polygon files (*.json) found in {}", dir.display());
    }

    let start = Instant::now();
    let provider = provider_for(model, radius_m);
    let progress = create_progress(files.len() as u64)?;
    let mut rows = Vec::with_capacity(files.len());
    let mut total = 0.0;

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(name.clone());

        match load_polygon(path) {
            Ok(vertices) => {
                let area = polygon_area_hectares(&provider, &vertices);
                total += area.value();
                rows.push(format!("{name:<32} {:>12}", area.to_string()));
            }
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), anyhow::Error::from(e));
                rows.push(format!("{name:<32} {:>12}", "invalid"));
            }
        }
        progress.inc(1);
    }

    progress.finish_with_message(format!(
        "Measured {} files [{:.1}s]",
        files.len(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    for row in rows {
        println!("{row}");
    }
    println!("{:<32} {:>12}", "TOTAL", Hectares(total).to_string());

    Ok(())
}

fn create_progress(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vertex() {
        let v = parse_vertex("-12.0464, -77.0428").unwrap();
        assert_eq!(v.lat(), -12.0464);
        assert_eq!(v.lng(), -77.0428);
        assert!(parse_vertex("-12.0464").is_err());
        assert!(parse_vertex("abc,1").is_err());
        assert!(parse_vertex("91,0").is_err());
    }

    #[test]
    fn test_cli_parses_distance() {
        let args = Args::try_parse_from([
            "agroarea",
            "distance",
            "-12.0,-77.0",
            "-12.1,-77.1",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Distance { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::try_parse_from([
            "agroarea",
            "--max-area",
            "250",
            "--model",
            "geodesic",
            "area",
            "lote.json",
        ])
        .unwrap();
        assert_eq!(args.max_area, Some(250.0));
        assert_eq!(args.model, Some(AreaModel::Geodesic));
    }
}
