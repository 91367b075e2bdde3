use trusslink::{force, persistence, point, Dimensions, Material, Model};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = Model::new(Dimensions::Three);
    model.add_material(Material::new(0, 200.0e9, 0.01, 7_850.0)?)?;
    model.add_node(0, point(0.0, 0.0, 0.0))?;
    model.add_node(1, point(1.0, 0.0, 0.0))?;
    model.set_constraints(0, [Some(0.0); 3])?;
    model.set_constraints(1, [None, Some(0.0), Some(0.0)])?;
    model.set_force(1, force(-1000.0, 0.0, 0.0))?;
    model.add_link(0, 0, 1, 0)?;

    let status = model.solve()?;
    println!("{}", status.message());

    if let Some(node) = model.solution().and_then(|solution| solution.node(1)) {
        println!("ux = {:.3e} m", node.displacement.x);
    }
    println!("{}", persistence::to_json(&model)?);

    Ok(())
}
