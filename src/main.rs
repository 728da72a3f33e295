use anyhow::Result;
use glaser::{
    build_profile, Construction, Layer, Material, Model, Parameters, DEFAULT_MIN_STEP,
};
use tracing_subscriber::EnvFilter;

/// Condensation-risk report for a concrete wall insulated with cork and
/// finished with laminated board, under default winter boundary conditions.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let parameters = Parameters::default();
    let base = Construction::new(
        "concrete_cork_lamination",
        vec![
            Layer::new(Material::concrete(), 0.3),
            Layer::new(Material::cork(), 0.2),
            Layer::new(Material::lamination(), 0.1),
        ],
        parameters.interior(),
        parameters.exterior(),
    );

    let model = Model::new(&base, parameters);
    let solved = model.solve()?;
    let profile = build_profile(&solved, DEFAULT_MIN_STEP);

    if std::env::args().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Wall: {}", model.construction.name);
    println!(
        "  Layers: {}",
        model
            .construction
            .layers
            .iter()
            .map(|l| format!("{} ({:.1}mm)", l.material.name, l.thickness * 1000.0))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    println!(
        "  Boundary: {:.1} C / {:.0}% inside, {:.1} C / {:.0}% outside",
        parameters.interior_temperature,
        parameters.interior_humidity,
        parameters.exterior_temperature,
        parameters.exterior_humidity,
    );
    println!("  R-total: {:.4} m2*K/W", profile.thermal_resistance);
    println!("  s_d-total: {:.3} m", profile.vapour_resistance);
    println!("  U-value: {:.4} W/(m2*K)", profile.u_value);
    println!();

    println!("Layer faces (interior to exterior):");
    println!("  {:>9}  {:>7}  {:>10}  entering", "depth", "T", "p_vap");
    for layer in &solved.layers {
        println!(
            "  {:>7.1}mm  {:>6.2}C  {:>8.1}Pa  {}",
            layer.x_interior * 1000.0,
            layer.t_interior,
            layer.p_interior,
            layer.layer.material.name,
        );
    }
    let last = solved.layers.last().expect("model always has film layers");
    println!(
        "  {:>7.1}mm  {:>6.2}C  {:>8.1}Pa  (exterior face)",
        last.x_exterior() * 1000.0,
        last.t_exterior(),
        last.p_exterior(),
    );
    println!();

    let zones = profile.condensation_zones();
    if zones.is_empty() {
        println!(
            "No condensation: {} sample points all below saturation.",
            profile.len()
        );
    } else {
        println!("Condensation zones:");
        for (start, end) in zones {
            println!("  {:.1}mm .. {:.1}mm", start * 1000.0, end * 1000.0);
        }
    }

    Ok(())
}
