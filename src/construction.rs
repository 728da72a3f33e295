use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SolveError;
use crate::materials::Material;
use crate::psychro;

/// Air state on one side of a construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirState {
    /// Dry-bulb temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
}

impl AirState {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// Partial vapour pressure of this air state in Pa.
    pub fn vapour_pressure(&self) -> f64 {
        psychro::vapour_pressure(self.temperature, self.humidity)
    }
}

/// One physical layer of a construction: a material at a given thickness.
///
/// Carries input data only; boundary temperatures and pressures live on
/// [`SolvedLayer`], produced by [`Construction::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub material: Material,
    /// Thickness in meters.
    pub thickness: f64,
}

impl Layer {
    pub fn new(material: Material, thickness: f64) -> Self {
        Self {
            material,
            thickness,
        }
    }

    /// Thermal resistance in m^2*K/W.
    ///
    /// Fails on non-positive thickness or conductivity; such a layer is
    /// physically meaningless and must not be silently absorbed.
    pub fn thermal_resistance(&self) -> Result<f64, SolveError> {
        self.check_positive("thickness", self.thickness)?;
        self.check_positive("conductivity", self.material.conductivity)?;
        Ok(self.thickness / self.material.conductivity)
    }

    /// Vapour resistance as equivalent still-air thickness (s_d) in m.
    pub fn vapour_resistance(&self) -> Result<f64, SolveError> {
        self.check_positive("thickness", self.thickness)?;
        self.check_positive("vapour resistivity", self.material.vapour_resistivity)?;
        Ok(self.material.vapour_resistivity * self.thickness)
    }

    fn check_positive(&self, quantity: &'static str, value: f64) -> Result<(), SolveError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(SolveError::InvalidLayer {
                name: self.material.name.clone(),
                quantity,
                value,
            })
        }
    }
}

/// A layer with its boundary state resolved by [`Construction::solve`].
///
/// Positions, temperatures and pressures refer to the layer's interior face;
/// the exterior face follows from the stored drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedLayer {
    pub layer: Layer,
    /// Depth of the interior face, measured from the construction's
    /// interior surface, in m.
    pub x_interior: f64,
    /// Temperature at the interior face in °C.
    pub t_interior: f64,
    /// Temperature change across the layer (exterior minus interior) in K.
    pub dt: f64,
    /// Vapour pressure at the interior face in Pa.
    pub p_interior: f64,
    /// Vapour-pressure change across the layer in Pa.
    pub dp: f64,
}

impl SolvedLayer {
    /// Depth of the exterior face in m.
    pub fn x_exterior(&self) -> f64 {
        self.x_interior + self.layer.thickness
    }

    /// Temperature at the exterior face in °C.
    pub fn t_exterior(&self) -> f64 {
        self.t_interior + self.dt
    }

    /// Vapour pressure at the exterior face in Pa.
    pub fn p_exterior(&self) -> f64 {
        self.p_interior + self.dp
    }
}

/// An ordered stack of layers between two air states.
///
/// Layer order is physically meaningful: the first layer is innermost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub name: String,
    /// Layers ordered interior to exterior.
    pub layers: Vec<Layer>,
    pub interior: AirState,
    pub exterior: AirState,
}

impl Construction {
    pub fn new(name: &str, layers: Vec<Layer>, interior: AirState, exterior: AirState) -> Self {
        Self {
            name: name.to_string(),
            layers,
            interior,
            exterior,
        }
    }

    /// Total thickness in m.
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    /// Total thermal resistance in m^2*K/W.
    pub fn thermal_resistance(&self) -> Result<f64, SolveError> {
        let mut r = 0.0;
        for layer in &self.layers {
            r += layer.thermal_resistance()?;
        }
        Ok(r)
    }

    /// Total vapour resistance (s_d) in m.
    pub fn vapour_resistance(&self) -> Result<f64, SolveError> {
        let mut r = 0.0;
        for layer in &self.layers {
            r += layer.vapour_resistance()?;
        }
        Ok(r)
    }

    /// U-value in W/(m^2*K), recomputed from the current layers.
    pub fn u_value(&self) -> Result<f64, SolveError> {
        let r = self.thermal_resistance()?;
        if r > 0.0 {
            Ok(1.0 / r)
        } else {
            Err(self.singular("thermal"))
        }
    }

    /// Distributes the boundary temperature and vapour-pressure drops across
    /// the layers, proportionally to each layer's share of the total
    /// resistance (series-resistance divider, applied independently to the
    /// thermal and vapour-diffusion domains).
    ///
    /// Pure: returns a new [`SolvedConstruction`] and leaves `self` untouched.
    pub fn solve(&self) -> Result<SolvedConstruction, SolveError> {
        let r_total = self.thermal_resistance()?;
        let rv_total = self.vapour_resistance()?;
        if r_total <= 0.0 {
            return Err(self.singular("thermal"));
        }
        if rv_total <= 0.0 {
            return Err(self.singular("vapour"));
        }

        let p_interior = self.interior.vapour_pressure();
        let p_exterior = self.exterior.vapour_pressure();
        let dt_total = self.exterior.temperature - self.interior.temperature;
        let dp_total = p_exterior - p_interior;

        let mut x = 0.0;
        let mut t = self.interior.temperature;
        let mut p = p_interior;
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let dt = layer.thermal_resistance()? / r_total * dt_total;
            let dp = layer.vapour_resistance()? / rv_total * dp_total;
            layers.push(SolvedLayer {
                layer: layer.clone(),
                x_interior: x,
                t_interior: t,
                dt,
                p_interior: p,
                dp,
            });
            x += layer.thickness;
            t += dt;
            p += dp;
        }

        debug!(
            construction = %self.name,
            r_total,
            rv_total,
            u_value = 1.0 / r_total,
            layers = layers.len(),
            "solved construction"
        );

        Ok(SolvedConstruction {
            layers,
            interior: self.interior,
            exterior: self.exterior,
            thermal_resistance: r_total,
            vapour_resistance: rv_total,
        })
    }

    fn singular(&self, domain: &'static str) -> SolveError {
        SolveError::SingularBoundary {
            name: self.name.clone(),
            domain,
        }
    }
}

/// Immutable result of [`Construction::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedConstruction {
    /// Solved layers, interior to exterior.
    pub layers: Vec<SolvedLayer>,
    pub interior: AirState,
    pub exterior: AirState,
    /// Total thermal resistance in m^2*K/W.
    pub thermal_resistance: f64,
    /// Total vapour resistance (s_d) in m.
    pub vapour_resistance: f64,
}

impl SolvedConstruction {
    /// U-value in W/(m^2*K).
    pub fn u_value(&self) -> f64 {
        1.0 / self.thermal_resistance
    }

    /// Total thickness in m.
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.layer.thickness).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> (AirState, AirState) {
        (AirState::new(20.0, 50.0), AirState::new(5.0, 80.0))
    }

    #[test]
    fn test_single_layer_u_value() {
        // Single resistor: U = conductivity / thickness exactly.
        let (interior, exterior) = boundary();
        let c = Construction::new(
            "single",
            vec![Layer::new(Material::concrete(), 0.3)],
            interior,
            exterior,
        );
        let u = c.u_value().unwrap();
        assert!((u - 2.0 / 0.3).abs() < 1e-12, "U = {u}");
    }

    #[test]
    fn test_series_resistance_law() {
        let (interior, exterior) = boundary();
        let layers = vec![
            Layer::new(Material::concrete(), 0.3),
            Layer::new(Material::cork(), 0.2),
            Layer::new(Material::lamination(), 0.1),
        ];
        let c = Construction::new("wall", layers.clone(), interior, exterior);
        let expected_r = 0.3 / 2.0 + 0.2 / 0.05 + 0.1 / 0.13;
        assert!((c.thermal_resistance().unwrap() - expected_r).abs() < 1e-12);

        // Aggregate U is independent of layer order.
        let mut reversed = layers;
        reversed.reverse();
        let rc = Construction::new("wall_reversed", reversed, interior, exterior);
        assert!((c.u_value().unwrap() - rc.u_value().unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_reference_wall_scenario() {
        // R = 0.15 + 4.0 + 0.769 = 4.919 m2*K/W, U ~ 0.2033 W/(m2*K),
        // concrete dt ~ (0.15/4.919) * (-15) ~ -0.457 K.
        let c = Construction::new(
            "wall",
            vec![
                Layer::new(Material::concrete(), 0.3),
                Layer::new(Material::cork(), 0.2),
                Layer::new(Material::lamination(), 0.1),
            ],
            AirState::new(20.0, 50.0),
            AirState::new(5.0, 80.0),
        );
        let r = c.thermal_resistance().unwrap();
        assert!((r - 4.919).abs() < 1e-3, "R = {r}");
        let u = c.u_value().unwrap();
        assert!((u - 0.2033).abs() < 1e-4, "U = {u}");

        let solved = c.solve().unwrap();
        let concrete = &solved.layers[0];
        assert!((concrete.dt + 0.457).abs() < 1e-3, "dt = {}", concrete.dt);
        assert_eq!(concrete.t_interior, 20.0);
        assert_eq!(concrete.x_interior, 0.0);
    }

    #[test]
    fn test_solved_layers_chain() {
        let c = Construction::new(
            "wall",
            vec![
                Layer::new(Material::concrete(), 0.3),
                Layer::new(Material::cork(), 0.2),
            ],
            AirState::new(20.0, 50.0),
            AirState::new(-10.0, 80.0),
        );
        let solved = c.solve().unwrap();

        // Each layer starts where the previous one ends.
        for pair in solved.layers.windows(2) {
            assert!((pair[1].x_interior - pair[0].x_exterior()).abs() < 1e-12);
            assert!((pair[1].t_interior - pair[0].t_exterior()).abs() < 1e-12);
            assert!((pair[1].p_interior - pair[0].p_exterior()).abs() < 1e-12);
        }

        // The chain spans the full boundary drop.
        let last = solved.layers.last().unwrap();
        assert!((last.t_exterior() - c.exterior.temperature).abs() < 1e-9);
        assert!((last.p_exterior() - c.exterior.vapour_pressure()).abs() < 1e-9);
        assert!((last.x_exterior() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_vapour_drop_proportional_to_sd() {
        let c = Construction::new(
            "wall",
            vec![
                Layer::new(Material::concrete(), 0.3), // s_d = 24
                Layer::new(Material::cork(), 0.2),     // s_d = 2
            ],
            AirState::new(20.0, 50.0),
            AirState::new(5.0, 80.0),
        );
        let solved = c.solve().unwrap();
        assert!((solved.vapour_resistance - 26.0).abs() < 1e-12);
        let dp_total =
            c.exterior.vapour_pressure() - c.interior.vapour_pressure();
        let dp_concrete = solved.layers[0].dp;
        assert!((dp_concrete - dp_total * 24.0 / 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_thickness_layer_rejected() {
        let (interior, exterior) = boundary();
        let c = Construction::new(
            "bad",
            vec![Layer::new(Material::concrete(), 0.0)],
            interior,
            exterior,
        );
        match c.solve() {
            Err(SolveError::InvalidLayer { quantity, .. }) => {
                assert_eq!(quantity, "thickness");
            }
            other => panic!("expected InvalidLayer, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_conductivity_layer_rejected() {
        let (interior, exterior) = boundary();
        let c = Construction::new(
            "bad",
            vec![Layer::new(Material::new("void", 0.0, 1.0, 1.0, 1.0), 0.1)],
            interior,
            exterior,
        );
        assert!(matches!(
            c.thermal_resistance(),
            Err(SolveError::InvalidLayer { quantity: "conductivity", .. })
        ));
    }

    #[test]
    fn test_empty_construction_is_singular() {
        let (interior, exterior) = boundary();
        let c = Construction::new("empty", vec![], interior, exterior);
        assert!(matches!(
            c.solve(),
            Err(SolveError::SingularBoundary { domain: "thermal", .. })
        ));
        assert!(c.u_value().is_err());
    }

    #[test]
    fn test_solve_leaves_input_untouched() {
        let (interior, exterior) = boundary();
        let c = Construction::new(
            "wall",
            vec![Layer::new(Material::cork(), 0.2)],
            interior,
            exterior,
        );
        let before = c.clone();
        let _ = c.solve().unwrap();
        assert_eq!(c, before);
    }
}
