//! Dense linear algebra kernel for stiffness assembly

pub mod frame;
pub mod gauss;

use nalgebra::storage::RawStorage;
use nalgebra::{DMatrix, DVector, Dim, Matrix, Matrix4, Matrix6, Vector6};

use crate::error::{FEAError, FEAResult};

pub use frame::{
    equivalent_point_load, equivalent_triangular_load, equivalent_uniform_load,
    expand_spring, frame_local_stiffness, release_end_moments, spring_local_stiffness,
    spring_transformation_matrix, transformation_matrix, SPRING_SLOTS,
};
pub use gauss::{solve, PIVOT_TOLERANCE};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for spring (translational-only) stiffness
pub type Mat4 = Matrix4<f64>;
/// 6x6 matrix for member stiffness and transformation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for member end forces/displacements
pub type Vec6 = Vector6<f64>;

/// Matrix product `a * b`
pub fn multiply(a: &Mat, b: &Mat) -> FEAResult<Mat> {
    if a.ncols() != b.nrows() {
        return Err(FEAError::shape("multiply", a.shape(), b.shape()));
    }
    Ok(a * b)
}

/// Matrix-vector product `a * x`
pub fn multiply_vector(a: &Mat, x: &Vec) -> FEAResult<Vec> {
    if a.ncols() != x.len() {
        return Err(FEAError::shape("multiply_vector", a.shape(), (x.len(), 1)));
    }
    Ok(a * x)
}

pub fn transpose(a: &Mat) -> Mat {
    a.transpose()
}

/// Gather `m[rows[i]][cols[j]]` into a new `rows.len() x cols.len()` matrix
pub fn extract_submatrix(m: &Mat, rows: &[usize], cols: &[usize]) -> Mat {
    Mat::from_fn(rows.len(), cols.len(), |i, j| m[(rows[i], cols[j])])
}

/// Gather `v[indices[i]]` into a new vector
pub fn extract_subvector(v: &Vec, indices: &[usize]) -> Vec {
    Vec::from_iterator(indices.len(), indices.iter().map(|&i| v[i]))
}

/// Accumulate `target[rows[i]][cols[j]] += source[i][j]`
///
/// This is the only assembly primitive: several elements share DOFs, so
/// contributions are always added, never written.
pub fn scatter_add<R, C, S>(
    target: &mut Mat,
    source: &Matrix<f64, R, C, S>,
    rows: &[usize],
    cols: &[usize],
) -> FEAResult<()>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    if source.nrows() != rows.len() || source.ncols() != cols.len() {
        return Err(FEAError::shape(
            "scatter_add",
            source.shape(),
            (rows.len(), cols.len()),
        ));
    }
    let out_of_range = rows.iter().any(|&r| r >= target.nrows())
        || cols.iter().any(|&c| c >= target.ncols());
    if out_of_range {
        return Err(FEAError::ShapeMismatch(format!(
            "scatter_add: indices outside {}x{} target",
            target.nrows(),
            target.ncols()
        )));
    }

    for (i, &gi) in rows.iter().enumerate() {
        for (j, &gj) in cols.iter().enumerate() {
            target[(gi, gj)] += source[(i, j)];
        }
    }
    Ok(())
}

/// Accumulate `target[indices[i]] += source[i]`
pub fn scatter_add_vector(target: &mut Vec, source: &[f64], indices: &[usize]) -> FEAResult<()> {
    if source.len() != indices.len() {
        return Err(FEAError::shape(
            "scatter_add_vector",
            (source.len(), 1),
            (indices.len(), 1),
        ));
    }
    for (&value, &gi) in source.iter().zip(indices) {
        if gi >= target.len() {
            return Err(FEAError::ShapeMismatch(format!(
                "scatter_add_vector: index {gi} outside vector of length {}",
                target.len()
            )));
        }
        target[gi] += value;
    }
    Ok(())
}

/// Largest absolute entry of a matrix (0.0 for an empty matrix)
pub fn max_abs(m: &Mat) -> f64 {
    m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
