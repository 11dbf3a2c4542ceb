//! Hatch job files.
//!
//! A job is a YAML file naming the regions to fill and the hatch layers to
//! fill them with:
//!
//! ```yaml
//! name: wall section
//! bounds:
//!   - shape: rect
//!     min: [0, 0]
//!     max: [200, 30]
//!   - shape: circle
//!     center: [100, 80]
//!     radius: 25
//!   - shape: polygon
//!     points: [[0, 100], [60, 100], [30, 150]]
//!   - shape: path
//!     d: "M 120 100 h 60 v 50 h -60 z"
//! layers:
//!   - pattern: brick
//!     spacing: 6
//!   - pattern: insulation-soft
//!     spacing: 10
//!     angle: 90
//!     color: "#cc3300"
//! ```
//!
//! Everything is validated when the job is resolved, before any tiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use draft_kernel::{Bounds, Color, HatchSpec, KernelError, PatternKind, Point, bounds_from_path_data};

use super::common::CliResult;

/// A complete job: regions plus layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job name/title
    #[serde(default)]
    pub name: Option<String>,

    /// Regions to fill
    pub bounds: Vec<BoundsDef>,

    /// Hatch layers, applied to every region (rendered bottom to top)
    pub layers: Vec<LayerDef>,
}

/// A region as written in the job file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum BoundsDef {
    Rect { min: [f64; 2], max: [f64; 2] },
    Circle { center: [f64; 2], radius: f64 },
    Polygon { points: Vec<[f64; 2]> },
    /// SVG path data; every closed subpath becomes a region.
    Path { d: String },
}

/// A single hatch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDef {
    /// Pattern kind (e.g., "parallel", "brick", "stone"); unknown names hatch as parallel
    pub pattern: String,

    /// Pattern spacing
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// Pattern angle (degrees)
    #[serde(default)]
    pub angle: f64,

    /// Stroke color, any SVG color
    #[serde(default = "default_color")]
    pub color: String,

    /// Whether this layer is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Jitter seed for the organic patterns
    #[serde(default)]
    pub seed: u64,
}

fn default_spacing() -> f64 {
    5.0
}

fn default_color() -> String {
    "black".to_string()
}

fn default_enabled() -> bool {
    true
}

fn point([x, y]: [f64; 2]) -> Point {
    Point::new(x, y)
}

impl BoundsDef {
    /// Validated kernel regions.
    pub fn resolve(&self) -> Result<Vec<Bounds>, KernelError> {
        match self {
            BoundsDef::Rect { min, max } => Ok(vec![Bounds::rect(min[0], min[1], max[0], max[1])?]),
            BoundsDef::Circle { center, radius } => Ok(vec![Bounds::circle(point(*center), *radius)?]),
            BoundsDef::Polygon { points } => Ok(vec![Bounds::polygon(points.iter().copied().map(point).collect())?]),
            BoundsDef::Path { d } => bounds_from_path_data(d),
        }
    }
}

impl LayerDef {
    /// Validated hatch spec with its stroke color.
    pub fn resolve(&self) -> Result<HatchSpec, KernelError> {
        let kind = PatternKind::from_name(&self.pattern);
        Ok(HatchSpec::new(kind, self.spacing, self.angle)?
            .with_color(Color::parse(&self.color)?)
            .with_seed(self.seed))
    }
}

/// A job after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedJob {
    pub bounds: Vec<Bounds>,
    pub layers: Vec<HatchSpec>,
}

impl Job {
    /// Load a job from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read job file {}: {}", path.as_ref().display(), e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> CliResult<Self> {
        serde_yaml::from_str(content).map_err(|e| format!("failed to parse job YAML: {e}").into())
    }

    /// Convert to kernel types, dropping disabled layers.
    pub fn resolve(&self) -> Result<ResolvedJob, KernelError> {
        let mut bounds = Vec::new();
        for def in &self.bounds {
            bounds.extend(def.resolve()?);
        }
        let layers = self
            .layers
            .iter()
            .filter(|layer| layer.enabled)
            .map(LayerDef::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            job = self.name.as_deref().unwrap_or("unnamed"),
            bounds = bounds.len(),
            layers = layers.len(),
            "resolved job"
        );
        Ok(ResolvedJob { bounds, layers })
    }
}

/// Whether a path names a job file rather than an SVG.
pub fn is_job_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}
