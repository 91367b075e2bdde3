use trusslink::{force, point, Dimensions, Material, Model, ModelEditError};

/// Physical properties used for the demonstration bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CantileverProperties {
    /// Cross-sectional area in square metres.
    pub area: f64,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Density in kilograms per cubic metre.
    pub density: f64,
    /// Length of the bar in metres.
    pub length: f64,
    /// Axial load in newtons applied at the free end.
    pub axial_load: f64,
}

impl Default for CantileverProperties {
    fn default() -> Self {
        Self {
            area: 0.01,
            elastic_modulus: 200.0e9,
            density: 7_850.0,
            length: 1.0,
            axial_load: -1_000.0,
        }
    }
}

/// Build a planar bar fixed at node 0 and loaded axially at node 1.
///
/// Node 1 is held vertically so only the axial direction carries the load,
/// which keeps the closed-form answer `F L / (A E)` available for comparison
/// (see <https://en.wikipedia.org/wiki/Truss#Analysis>).
pub fn build_cantilever(properties: &CantileverProperties) -> Result<Model, ModelEditError> {
    let mut model = Model::new(Dimensions::Two);
    model.set_notes("demonstration cantilever bar");
    model.add_material(Material::new(
        0,
        properties.elastic_modulus,
        properties.area,
        properties.density,
    )?)?;

    model.add_node(0, point(0.0, 0.0, 0.0))?;
    model.add_node(1, point(properties.length, 0.0, 0.0))?;
    model.add_link(0, 0, 1, 0)?;

    model.set_constraints(0, [Some(0.0), Some(0.0), None])?;
    model.set_constraints(1, [None, Some(0.0), None])?;
    model.set_force(1, force(properties.axial_load, 0.0, 0.0))?;
    Ok(model)
}
