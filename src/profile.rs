//! Dense hygrothermal profile assembly.
//!
//! A solved construction knows its state only at layer faces. For
//! condensation detection that is too coarse: saturation pressure falls
//! exponentially with temperature, so vapour pressure can cross the
//! saturation curve in the middle of a layer while staying below it at both
//! faces. [`build_profile`] refines each layer into fixed-size sub-steps and
//! assembles one dense profile across the whole construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::construction::SolvedConstruction;
use crate::psychro;

/// Default discretization step in m. Layers are subdivided so that no
/// sub-step exceeds this.
pub const DEFAULT_MIN_STEP: f64 = 0.005;

/// Hygrothermal state sampled through a construction, interior face
/// (depth 0) to exterior face (depth = total thickness).
///
/// The five sequences are parallel and equally long; depth is strictly
/// increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Depth from the interior face in m.
    pub depth: Vec<f64>,
    /// Temperature in °C.
    pub temperature: Vec<f64>,
    /// Vapour pressure in Pa.
    pub vapour_pressure: Vec<f64>,
    /// Dew point in °C.
    pub dew_point: Vec<f64>,
    /// Relative humidity in %, unclamped (> 100 means condensation).
    pub relative_humidity: Vec<f64>,
    /// U-value in W/(m^2*K).
    pub u_value: f64,
    /// Total thermal resistance in m^2*K/W.
    pub thermal_resistance: f64,
    /// Total vapour resistance (s_d) in m.
    pub vapour_resistance: f64,
}

impl Profile {
    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Contiguous depth spans where vapour pressure reaches saturation,
    /// as (start, end) pairs in m. A span of a single sample has
    /// start == end.
    pub fn condensation_zones(&self) -> Vec<(f64, f64)> {
        let mut zones = Vec::new();
        let mut start: Option<f64> = None;
        for i in 0..self.len() {
            let wet = self.relative_humidity[i] >= 100.0;
            match (wet, start) {
                (true, None) => start = Some(self.depth[i]),
                (false, Some(s)) => {
                    zones.push((s, self.depth[i - 1]));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            zones.push((s, self.depth[self.len() - 1]));
        }
        zones
    }

    /// True if any sample point is at or beyond saturation.
    pub fn has_condensation(&self) -> bool {
        self.relative_humidity.iter().any(|&rh| rh >= 100.0)
    }

    fn push_sample(&mut self, depth: f64, temperature: f64, vapour_pressure: f64) {
        self.depth.push(depth);
        self.temperature.push(temperature);
        self.vapour_pressure.push(vapour_pressure);
        self.dew_point.push(psychro::dew_point(vapour_pressure));
        self.relative_humidity
            .push(psychro::relative_humidity(temperature, vapour_pressure));
    }
}

/// Number of uniform sub-steps for a layer of `thickness` at resolution
/// `min_step`. Thin layers get one step.
fn step_count(thickness: f64, min_step: f64) -> usize {
    (thickness / min_step).ceil().max(1.0) as usize
}

/// Build a dense [`Profile`] from a solved construction.
///
/// Each layer is subdivided into `ceil(thickness / min_step)` uniform steps
/// and sampled at its interior-aligned step positions, with temperature and
/// vapour pressure interpolated linearly between the layer's solved face
/// values. A layer's exterior face is contributed by the next layer's first
/// sample, so shared interface points appear exactly once; the construction's
/// exterior boundary closes the profile. Total sample count is the sum of
/// all step counts plus one.
pub fn build_profile(solved: &SolvedConstruction, min_step: f64) -> Profile {
    debug_assert!(min_step > 0.0, "min_step must be positive");

    let mut profile = Profile {
        depth: Vec::new(),
        temperature: Vec::new(),
        vapour_pressure: Vec::new(),
        dew_point: Vec::new(),
        relative_humidity: Vec::new(),
        u_value: solved.u_value(),
        thermal_resistance: solved.thermal_resistance,
        vapour_resistance: solved.vapour_resistance,
    };

    for layer in &solved.layers {
        let n = step_count(layer.layer.thickness, min_step);
        for i in 0..n {
            let f = i as f64 / n as f64;
            profile.push_sample(
                layer.x_interior + f * layer.layer.thickness,
                layer.t_interior + f * layer.dt,
                layer.p_interior + f * layer.dp,
            );
        }
    }
    profile.push_sample(
        solved.total_thickness(),
        solved.exterior.temperature,
        solved.exterior.vapour_pressure(),
    );

    debug!(
        samples = profile.len(),
        min_step,
        total_thickness = solved.total_thickness(),
        "assembled profile"
    );

    profile
}
