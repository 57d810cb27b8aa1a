//! Frame2D Solver Example - Simple Portal Frame

use anyhow::Result;

use frame2d_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Frame2D Solver Example: Portal Frame ===\n");

    let mut model = FrameModel::new();

    // Create a simple portal frame
    //
    //     N3 -------- N4
    //     |          |
    //     |          |
    //     |          |
    //     N1        N2
    //     ^          ^
    //   Fixed     Fixed
    //

    // Add nodes (in meters)
    let height = 4.0; // 4m column height
    let span = 6.0; // 6m beam span

    model.add_node("N1", 0.0, 0.0)?;
    model.add_node("N2", span, 0.0)?;
    model.add_node("N3", 0.0, height)?;
    model.add_node("N4", span, height)?;

    // Steel, A = 0.00494 m², I = 8.49e-5 m⁴
    let e = 200e9;
    let (area, inertia) = (0.00494, 8.49e-5);

    model.add_frame("Col1", "N1", "N3", e * area, e * inertia)?;
    model.add_frame("Col2", "N2", "N4", e * area, e * inertia)?;
    model.add_frame("Beam", "N3", "N4", e * area, e * inertia)?;

    // Add fixed supports at base
    model.add_support("N1", Support::fixed())?;
    model.add_support("N2", Support::fixed())?;

    // 20 kN/m on the beam (negative Y = downward)
    model.add_global_member_load("Beam", MemberLoadKind::Uniform, 0.0, -20000.0)?;

    // 10 kN lateral load at roof level (positive X)
    model.add_nodal_load("N3", NodeLoad::force(10000.0, 0.0))?;

    // 5 kN·m clockwise couple at the right knee
    model.add_nodal_load("N4", NodeLoad::moment(-5000.0))?;

    println!("Running linear analysis...\n");
    let results = model.analyze()?;

    // Node displacements
    println!("Node Displacements:");
    for (node_name, disp) in &results.displacements {
        println!(
            "  {}: DX={:.4}mm, DY={:.4}mm, RZ={:.6}rad",
            node_name,
            disp.x * 1000.0,
            disp.y * 1000.0,
            disp.rotation
        );
    }

    // Reactions
    println!("\nSupport Reactions:");
    for (node_name, rxn) in &results.reactions {
        println!(
            "  {}: FX={:.2}kN, FY={:.2}kN, MZ={:.2}kN·m",
            node_name,
            rxn.fx / 1000.0,
            rxn.fy / 1000.0,
            rxn.moment / 1000.0
        );
    }

    // Member forces
    println!("\nMember Forces:");
    for (member_name, forces) in &results.member_forces {
        println!(
            "  {}: N={:.2}kN, V={:.2}/{:.2}kN, M={:.2}/{:.2}kN·m, |M|max={:.2}kN·m",
            member_name,
            forces.start.fx / 1000.0,
            forces.start.fy / 1000.0,
            forces.end.fy / 1000.0,
            forces.start.moment / 1000.0,
            forces.end.moment / 1000.0,
            forces.max_abs_moment() / 1000.0
        );
    }

    // Summary
    let summary = results.summary();
    println!("\nSummary:");
    println!("  Max displacement: {:.4}mm at {}", summary.max_displacement * 1000.0, summary.max_disp_node);
    println!("  Max reaction: {:.2}kN at {}", summary.max_reaction / 1000.0, summary.max_reaction_node);
    println!("  Max axial: {:.2}kN in {}", summary.max_axial / 1000.0, summary.max_axial_member);
    println!("  Max moment: {:.2}kN·m in {}", summary.max_moment / 1000.0, summary.max_moment_member);
    println!(
        "  Equilibrium residual: FX={:.3e}, FY={:.3e}",
        results.equilibrium_residual[0], results.equilibrium_residual[1]
    );

    println!("\n=== Analysis Complete ===");
    Ok(())
}
