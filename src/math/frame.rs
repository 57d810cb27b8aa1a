//! Element formulations for planar frame and spring members
//!
//! Local DOF order for every member is
//! `[axial_i, shear_i, moment_i, axial_j, shear_j, moment_j]`.
//! Springs only use the translational slots, see [`SPRING_SLOTS`].

use super::{Mat4, Mat6, Vec6};

/// Positions of the spring's 4 translational DOFs inside the 6-DOF layout
pub const SPRING_SLOTS: [usize; 4] = [0, 1, 3, 4];

/// Compute the local stiffness matrix for a planar frame element
///
/// # Arguments
/// * `ea` - Axial stiffness E·A
/// * `ei` - Bending stiffness E·I (0 for a truss)
/// * `length` - Member length
pub fn frame_local_stiffness(ea: f64, ei: f64, length: f64) -> Mat6 {
    let l = length;
    let c1 = ea / l;
    let c2 = ei / (l * l * l);

    #[rustfmt::skip]
    let data = [
        c1,   0.0,             0.0,             -c1,  0.0,             0.0,
        0.0,  12.0 * c2,       6.0 * c2 * l,    0.0,  -12.0 * c2,      6.0 * c2 * l,
        0.0,  6.0 * c2 * l,    4.0 * c2 * l * l, 0.0, -6.0 * c2 * l,   2.0 * c2 * l * l,
        -c1,  0.0,             0.0,             c1,   0.0,             0.0,
        0.0,  -12.0 * c2,      -6.0 * c2 * l,   0.0,  12.0 * c2,       -6.0 * c2 * l,
        0.0,  6.0 * c2 * l,    2.0 * c2 * l * l, 0.0, -6.0 * c2 * l,   4.0 * c2 * l * l,
    ];

    Mat6::from_row_slice(&data)
}

/// Compute the local stiffness matrix for a linear spring, order `[xi, yi, xj, yj]`
///
/// A spring has no transverse or rotational stiffness.
pub fn spring_local_stiffness(k: f64) -> Mat4 {
    #[rustfmt::skip]
    let data = [
        k,    0.0, -k,   0.0,
        0.0,  0.0, 0.0,  0.0,
        -k,   0.0, k,    0.0,
        0.0,  0.0, 0.0,  0.0,
    ];

    Mat4::from_row_slice(&data)
}

/// Global-to-local rotation for a 6-DOF member
pub fn transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    #[rustfmt::skip]
    let data = [
        cos,  sin, 0.0, 0.0,  0.0, 0.0,
        -sin, cos, 0.0, 0.0,  0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,  0.0, 0.0,
        0.0,  0.0, 0.0, cos,  sin, 0.0,
        0.0,  0.0, 0.0, -sin, cos, 0.0,
        0.0,  0.0, 0.0, 0.0,  0.0, 1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Global-to-local rotation for a spring (rotational rows/columns removed)
pub fn spring_transformation_matrix(cos: f64, sin: f64) -> Mat4 {
    let t = transformation_matrix(cos, sin);
    Mat4::from_fn(|i, j| t[(SPRING_SLOTS[i], SPRING_SLOTS[j])])
}

/// Expand a 4x4 spring block into the 6x6 member layout
///
/// Local slots `[0, 1, 2, 3]` land on `[0, 1, 3, 4]`; the rotational slots
/// stay zero.
pub fn expand_spring(k4: &Mat4) -> Mat6 {
    let mut k6 = Mat6::zeros();
    for (a, &ga) in SPRING_SLOTS.iter().enumerate() {
        for (b, &gb) in SPRING_SLOTS.iter().enumerate() {
            k6[(ga, gb)] = k4[(a, b)];
        }
    }
    k6
}

/// Equivalent nodal loads for a uniform load over the full member
///
/// # Arguments
/// * `w` - Transverse intensity in local y (positive = local +y)
/// * `w_axial` - Axial intensity in local x
/// * `length` - Member length
pub fn equivalent_uniform_load(w: f64, w_axial: f64, length: f64) -> Vec6 {
    let l = length;
    Vec6::new(
        w_axial * l / 2.0,
        w * l / 2.0,
        w * l * l / 12.0,
        w_axial * l / 2.0,
        w * l / 2.0,
        -w * l * l / 12.0,
    )
}

/// Equivalent nodal loads for a symmetric triangular load peaking at midspan
pub fn equivalent_triangular_load(w: f64, w_axial: f64, length: f64) -> Vec6 {
    let l = length;
    Vec6::new(
        w_axial * l / 4.0,
        w * l / 4.0,
        5.0 * w * l * l / 96.0,
        w_axial * l / 4.0,
        w * l / 4.0,
        -5.0 * w * l * l / 96.0,
    )
}

/// Equivalent nodal loads for a concentrated load at distance `a` from node i
///
/// # Arguments
/// * `p` - Transverse load in local y
/// * `p_axial` - Axial load in local x
/// * `a` - Distance from the i-node, `0 <= a <= length`
/// * `length` - Member length
pub fn equivalent_point_load(p: f64, p_axial: f64, a: f64, length: f64) -> Vec6 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    Vec6::new(
        p_axial * b / l,
        p * b * b * (3.0 * a + b) / l3,
        p * a * b * b / l2,
        p_axial * a / l,
        p * a * a * (a + 3.0 * b) / l3,
        -p * a * a * b / l2,
    )
}

/// Release both end moments of an equivalent load vector
///
/// Used for members without rotational stiffness: the fixed-end moments are
/// carried by the end shears instead, giving simply-supported end reactions.
pub fn release_end_moments(eq: &Vec6, length: f64) -> Vec6 {
    let shift = (eq[2] + eq[5]) / length;
    Vec6::new(eq[0], eq[1] - shift, 0.0, eq[3], eq[4] + shift, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_stiffness_symmetry() {
        let k = frame_local_stiffness(200e9 * 0.01, 200e9 * 1e-4, 4.0);
        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
        assert_relative_eq!(k[(0, 0)], 5e8);
        assert_relative_eq!(k[(1, 1)], 12.0 * 2e7 / 64.0);
        assert_relative_eq!(k[(2, 2)], 4.0 * 2e7 / 4.0);
        assert_relative_eq!(k[(2, 5)], 2.0 * 2e7 / 4.0);
    }

    #[test]
    fn test_truss_has_no_bending_terms() {
        let k = frame_local_stiffness(1000.0, 0.0, 2.0);
        for &slot in &[1, 2, 4, 5] {
            for j in 0..6 {
                assert_eq!(k[(slot, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_transformation_is_orthogonal() {
        let angle: f64 = 0.7;
        let t = transformation_matrix(angle.cos(), angle.sin());
        let should_be_identity = t.transpose() * t;
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(should_be_identity[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_spring_expansion_and_rotation() {
        let k6 = expand_spring(&spring_local_stiffness(100.0));
        assert_relative_eq!(k6[(0, 0)], 100.0);
        assert_relative_eq!(k6[(0, 3)], -100.0);
        assert_relative_eq!(k6[(3, 3)], 100.0);
        assert_eq!(k6.row(2).iter().filter(|v| **v != 0.0).count(), 0);
        assert_eq!(k6.column(5).iter().filter(|v| **v != 0.0).count(), 0);

        // Vertical spring: local x is global Y
        let t4 = spring_transformation_matrix(0.0, 1.0);
        let k_global = t4.transpose() * spring_local_stiffness(100.0) * t4;
        assert_relative_eq!(k_global[(1, 1)], 100.0);
        assert_relative_eq!(k_global[(0, 0)], 0.0);
        assert_relative_eq!(k_global[(1, 3)], -100.0);
    }

    #[test]
    fn test_uniform_load_literal_values() {
        let eq = equivalent_uniform_load(-10.0, 0.0, 5.0);
        assert_relative_eq!(eq[1], -25.0);
        assert_relative_eq!(eq[4], -25.0);
        assert_relative_eq!(eq[2], -20.833333333333332, epsilon = 1e-12);
        assert_relative_eq!(eq[5], 20.833333333333332, epsilon = 1e-12);
        assert_eq!(eq[0], 0.0);
        assert_eq!(eq[3], 0.0);
    }

    #[test]
    fn test_triangular_load() {
        let eq = equivalent_triangular_load(-8.0, 0.0, 6.0);
        assert_relative_eq!(eq[1] + eq[4], -8.0 * 6.0 / 2.0);
        assert_relative_eq!(eq[2], 5.0 * -8.0 * 36.0 / 96.0);
        assert_relative_eq!(eq[5], -eq[2]);
    }

    #[test]
    fn test_point_load_midspan_matches_closed_form() {
        let p = -10000.0;
        let eq = equivalent_point_load(p, 0.0, 2.0, 4.0);
        assert_relative_eq!(eq[1], p / 2.0);
        assert_relative_eq!(eq[4], p / 2.0);
        assert_relative_eq!(eq[2], p * 4.0 / 8.0);
        assert_relative_eq!(eq[5], -p * 4.0 / 8.0);
    }

    #[test]
    fn test_point_load_off_center_sums_to_load() {
        let eq = equivalent_point_load(12.0, 3.0, 1.0, 4.0);
        assert_relative_eq!(eq[1] + eq[4], 12.0, epsilon = 1e-12);
        assert_relative_eq!(eq[0] + eq[3], 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq[0], 3.0 * 3.0 / 4.0);
    }

    #[test]
    fn test_released_moments_give_simple_span_shears() {
        let l = 4.0;
        let eq = release_end_moments(&equivalent_point_load(12.0, 0.0, 1.0, l), l);
        assert_relative_eq!(eq[1], 12.0 * 3.0 / 4.0, epsilon = 1e-12);
        assert_relative_eq!(eq[4], 12.0 * 1.0 / 4.0, epsilon = 1e-12);
        assert_eq!(eq[2], 0.0);
        assert_eq!(eq[5], 0.0);

        let udl = release_end_moments(&equivalent_uniform_load(-10.0, 0.0, 5.0), 5.0);
        assert_relative_eq!(udl[1], -25.0);
        assert_relative_eq!(udl[4], -25.0);
    }
}
