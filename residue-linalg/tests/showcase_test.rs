use residue_linalg::{ProblemConfig, ResidueError, ResidueMatrix, ResidueScalar, ResidueVector};

use std::sync::Once;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[test]
fn showcase_solve_triangular_system_mod_prime() -> Result<(), ResidueError> {
    init_logging();

    // A·x = b over Z_11, with A reduced first and x recovered by back substitution.
    let a = ResidueMatrix::try_with(3, 11, &[2, 3, 1, 4, 1, 5, 6, 2, 9])?;
    let x = ResidueVector::try_with(11, &[7, 3, 10])?;
    let b = a.mul_vector(&x)?;

    let augmented: Vec<Vec<u64>> = a
        .to_values()
        .into_iter()
        .zip(b.to_values())
        .map(|(mut row, rhs)| {
            row.push(rhs);
            row
        })
        .collect();
    let reduced = ResidueMatrix::try_from_rows(11, &augmented)?.gauss()?;
    assert!(reduced.is_row_echelon());

    let n = 3;
    let mut solution = vec![ResidueScalar::zero(11)?; n];
    for row in (0..n).rev() {
        let cells = reduced.row(row).ok_or_else(|| {
            ResidueError::InvalidParameters(format!("missing row {}", row))
        })?;
        let mut rhs = cells[n];
        for col in (row + 1)..n {
            rhs = rhs.sub(&cells[col].mul(&solution[col])?)?;
        }
        solution[row] = rhs.div(&cells[row])?;
    }

    assert_eq!(ResidueVector::try_from_scalars(&solution)?, x);
    Ok(())
}

#[test]
fn showcase_config_driven_run() -> Result<(), ResidueError> {
    init_logging();

    let config = ProblemConfig::from_json(
        r#"{ "width": 3, "modulus": 7, "values": [0, 2, 1, 3, 1, 4, 6, 5, 2] }"#,
    )?;
    let matrix = config.matrix()?;
    let result = matrix.gauss_with_steps()?;

    dbg!(result.steps());

    assert!(result.steps().starts_with("Swapping lines 0 and 1:"));
    assert!(result.matrix().is_row_echelon());

    let product = matrix.mul_matrix(&ResidueMatrix::identity(3, 7)?)?;
    assert_eq!(product, matrix);
    Ok(())
}
