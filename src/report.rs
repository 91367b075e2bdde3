use std::fmt;

use trusslink::{Model, SolveStatus};

/// Textual summary of a solved model.
///
/// Walks through the status, per-node and per-link results, the extremes and
/// the mass table so the numbers can be cross-checked by hand (see
/// <https://en.wikipedia.org/wiki/Young%27s_modulus>).
pub struct Report<'a> {
    /// Model with its cached solution.
    pub model: &'a Model,
    /// Status of the solve.
    pub status: &'a SolveStatus,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.model.units();
        let (length, mass) = (&units.length, &units.mass);

        writeln!(
            f,
            "{} model: {} nodes, {} links, {} materials",
            self.model.dimensions(),
            self.model.node_count(),
            self.model.link_count(),
            self.model.material_count()
        )?;
        if !self.model.notes().is_empty() {
            writeln!(f, "Notes: {}", self.model.notes())?;
        }
        writeln!(f, "Status: {}", self.status.message())?;
        if let SolveStatus::ConstraintsNotMet(violations) = self.status {
            for violation in violations {
                writeln!(
                    f,
                    "  node {} {}: prescribed {:+.3e}, solved {:+.3e} (tolerance {:.3e})",
                    violation.node,
                    violation.axis,
                    violation.prescribed,
                    violation.solved,
                    violation.tolerance
                )?;
            }
        }

        let Some(solution) = self.model.solution() else {
            return writeln!(f, "No solution available");
        };

        writeln!(f, "Nodes:")?;
        for node in solution.nodes.values() {
            let (u, r) = (node.displacement, node.reaction);
            writeln!(
                f,
                "  {:>4}  u = ({:+.3e}, {:+.3e}, {:+.3e}) {length}  R = ({:+.3e}, {:+.3e}, {:+.3e})",
                node.id, u.x, u.y, u.z, r.x, r.y, r.z
            )?;
        }

        writeln!(f, "Links:")?;
        for link in solution.links.values() {
            writeln!(
                f,
                "  {:>4}  {} -> {}  strain = {:+.3e}  stress = {:+.3e}  tension = {:+.3e}",
                link.id, link.node_a, link.node_b, link.strain, link.stress, link.tension
            )?;
        }

        let extremes = solution.extremes;
        writeln!(
            f,
            "Strain range: [{:+.3e}, {:+.3e}]",
            extremes.min_strain, extremes.max_strain
        )?;
        writeln!(
            f,
            "Stress range: [{:+.3e}, {:+.3e}]",
            extremes.min_stress, extremes.max_stress
        )?;
        writeln!(
            f,
            "Tension range: [{:+.3e}, {:+.3e}]",
            extremes.min_tension, extremes.max_tension
        )?;

        writeln!(f, "Materials:")?;
        for (material, total) in &solution.mass.per_material_length {
            let material_mass = solution
                .mass
                .per_material_mass
                .get(material)
                .copied()
                .unwrap_or_default();
            writeln!(
                f,
                "  {material:>4}  length = {total:.4} {length}  mass = {material_mass:.4} {mass}"
            )?;
        }
        write!(
            f,
            "Total: length = {:.4} {length}  mass = {:.4} {mass}",
            solution.mass.total_length, solution.mass.total_mass
        )
    }
}
