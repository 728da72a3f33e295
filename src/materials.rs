use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Hygrothermal material properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Thermal conductivity in W/(m*K).
    pub conductivity: f64,
    /// Water vapour diffusion resistance factor (dimensionless, still air = 1).
    ///
    /// Layer vapour resistance is `vapour_resistivity * thickness`, the
    /// equivalent still-air thickness (s_d value) in m.
    pub vapour_resistivity: f64,
    /// Density in kg/m^3.
    pub density: f64,
    /// Specific heat capacity in J/(kg*K).
    pub heat_capacity: f64,
}

impl Material {
    pub fn new(
        name: &str,
        conductivity: f64,
        vapour_resistivity: f64,
        density: f64,
        heat_capacity: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            conductivity,
            vapour_resistivity,
            density,
            heat_capacity,
        }
    }

    /// Still air, also used for surface-film layers.
    pub fn air() -> Self {
        Self::new("air", 0.025, 1.0, 1.2, 1000.0)
    }

    pub fn concrete() -> Self {
        Self::new("concrete", 2.0, 80.0, 2400.0, 900.0)
    }

    pub fn cork() -> Self {
        Self::new("cork", 0.05, 10.0, 160.0, 1800.0)
    }

    pub fn lamination() -> Self {
        Self::new("lamination", 0.13, 40.0, 500.0, 1600.0)
    }

    /// Thin polyethylene foil; vapour-tight, thermally negligible.
    pub fn vapour_retarder() -> Self {
        Self::new("vapour_retarder", 0.33, 100_000.0, 980.0, 1900.0)
    }
}

/// Library of named materials.
///
/// Presets are built once and shared by reference; looking a material up
/// never reconstructs it.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Adds a material to the library, replacing any previous entry with
    /// the same name.
    pub fn add(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Returns a reference to a material by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Creates a library pre-populated with the built-in materials.
    pub fn with_presets() -> Self {
        let mut lib = Self::new();
        lib.add(Material::air());
        lib.add(Material::concrete());
        lib.add(Material::cork());
        lib.add(Material::lamination());
        lib.add(Material::vapour_retarder());
        lib
    }
}
