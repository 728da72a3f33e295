use serde::{Deserialize, Serialize};

use crate::construction::{AirState, Construction, Layer, SolvedConstruction};
use crate::error::SolveError;
use crate::materials::Material;

/// Boundary conditions for a simulation run.
///
/// Contact distances are equivalent still-air thicknesses representing the
/// convective surface films (ISO 6946 style fixed surface resistances,
/// expressed as thin air layers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Interior air temperature in °C.
    pub interior_temperature: f64,
    /// Interior relative humidity in %.
    pub interior_humidity: f64,
    /// Exterior air temperature in °C.
    pub exterior_temperature: f64,
    /// Exterior relative humidity in %.
    pub exterior_humidity: f64,
    /// Interior surface-film thickness in m.
    pub interior_contact_distance: f64,
    /// Exterior surface-film thickness in m.
    pub exterior_contact_distance: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            interior_temperature: 20.0,
            interior_humidity: 50.0,
            exterior_temperature: 5.0,
            exterior_humidity: 80.0,
            interior_contact_distance: 0.00625,
            exterior_contact_distance: 0.001,
        }
    }
}

impl Parameters {
    /// Interior boundary air state.
    pub fn interior(&self) -> AirState {
        AirState::new(self.interior_temperature, self.interior_humidity)
    }

    /// Exterior boundary air state.
    pub fn exterior(&self) -> AirState {
        AirState::new(self.exterior_temperature, self.exterior_humidity)
    }
}

/// A construction prepared for simulation: the base layer stack wrapped in
/// interior and exterior air-film layers, under the boundary conditions
/// from [`Parameters`].
///
/// Reporting always runs on the augmented construction, never on the bare
/// layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub parameters: Parameters,
    pub construction: Construction,
}

impl Model {
    pub fn new(base: &Construction, parameters: Parameters) -> Self {
        let mut layers = Vec::with_capacity(base.layers.len() + 2);
        layers.push(Layer::new(
            Material::air(),
            parameters.interior_contact_distance,
        ));
        layers.extend(base.layers.iter().cloned());
        layers.push(Layer::new(
            Material::air(),
            parameters.exterior_contact_distance,
        ));
        let construction = Construction::new(
            &base.name,
            layers,
            parameters.interior(),
            parameters.exterior(),
        );
        Self {
            parameters,
            construction,
        }
    }

    /// Solves the augmented construction.
    pub fn solve(&self) -> Result<SolvedConstruction, SolveError> {
        self.construction.solve()
    }
}
