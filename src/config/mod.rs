use serde::Deserialize;
use std::path::PathBuf;

/// WGS84 equatorial radius, used for Haversine distances and spherical area
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Largest farm area, in hectares, accepted when a drawing is completed
pub const MAX_AREA_HECTARES: f64 = 100.0;

/// Default spacing for the spacing-based interpolator
pub const DEFAULT_SPACING_M: f64 = 50.0;

/// Fewest vertices a persistable polygon may have
pub const MIN_VERTICES: usize = 3;

/// Most points the spacing interpolator emits for one edge
pub const MAX_INTERPOLATED_POINTS: usize = 100_000;

fn default_max_area_hectares() -> f64 {
    MAX_AREA_HECTARES
}
fn default_midpoint_spacing_m() -> f64 {
    DEFAULT_SPACING_M
}
fn default_earth_radius_m() -> f64 {
    EARTH_RADIUS_M
}
fn default_min_vertices() -> usize {
    MIN_VERTICES
}

/// Limits injected into the editor and the geometry helpers
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_max_area_hectares")]
    pub max_area_hectares: f64,
    #[serde(default = "default_midpoint_spacing_m")]
    pub midpoint_spacing_m: f64,
    /// Sphere radius for distances and spherical area
    #[serde(default = "default_earth_radius_m")]
    pub earth_radius_m: f64,
    /// Raised above 3 to demand richer outlines; lower values act as 3
    #[serde(default = "default_min_vertices")]
    pub min_vertices: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_area_hectares: MAX_AREA_HECTARES,
            midpoint_spacing_m: DEFAULT_SPACING_M,
            earth_radius_m: EARTH_RADIUS_M,
            min_vertices: MIN_VERTICES,
        }
    }
}

impl EditorConfig {
    pub fn with_max_area(mut self, hectares: f64) -> Self {
        self.max_area_hectares = hectares;
        self
    }

    pub fn with_spacing(mut self, meters: f64) -> Self {
        self.midpoint_spacing_m = meters;
        self
    }

    pub fn with_earth_radius(mut self, meters: f64) -> Self {
        self.earth_radius_m = meters;
        self
    }

    pub fn with_min_vertices(mut self, count: usize) -> Self {
        self.min_vertices = count;
        self
    }

    /// Minimum vertex count actually enforced; a ring never has fewer than 3
    pub fn vertex_floor(&self) -> usize {
        self.min_vertices.max(MIN_VERTICES)
    }
}

/// Which `geo` area model backs area computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AreaModel {
    /// Sphere of the equatorial radius, as map SDKs compute it
    #[default]
    Spherical,
    /// WGS84 ellipsoid
    Geodesic,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub editor: Option<EditorConfig>,
    #[serde(default)]
    pub area_model: Option<AreaModel>,
    #[serde(default)]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn editor_config(&self) -> EditorConfig {
        self.editor.unwrap_or_default()
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("agroarea.toml"));
    paths.push(PathBuf::from(".agroarea.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("agroarea").join("config.toml"));
        paths.push(config_dir.join("agroarea.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".agroarea.toml"));
        paths.push(home.join(".config").join("agroarea").join("config.toml"));
    }

    paths
}
