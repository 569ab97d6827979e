use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Upper bound of evaluated points for a curve, or of grid points for a surface
pub const MAX_SAMPLES: usize = 1_000_000;

/// Number of evaluated points for a sampling step in normalized parameter space
/// `round(1 / delta)` with at least the two end points and at most `MAX_SAMPLES`
/// # Example
/// ```
/// use geomdl_cli::prelude::sample_size;
/// assert_eq!(sample_size(0.01).unwrap(), 100);
/// assert_eq!(sample_size(0.3).unwrap(), 3);
/// assert!(sample_size(1.5).is_err());
/// assert!(sample_size(1e-12).is_err());
/// ```
pub fn sample_size<T: RealField + ToPrimitive + Copy>(delta: T) -> anyhow::Result<usize> {
    check_delta(delta)?;
    let count = (T::one() / delta)
        .round()
        .to_usize()
        .filter(|c| *c <= MAX_SAMPLES)
        .ok_or_else(|| too_small(delta))?;
    Ok(count.max(2))
}

/// Number of grid points for a pair of sampling steps, bounded by `MAX_SAMPLES`
pub fn grid_sample_size<T: RealField + ToPrimitive + Copy>(
    delta_u: T,
    delta_v: T,
) -> anyhow::Result<(usize, usize)> {
    let nu = sample_size(delta_u)?;
    let nv = sample_size(delta_v)?;
    anyhow::ensure!(
        nu.checked_mul(nv).is_some_and(|n| n <= MAX_SAMPLES),
        "Evaluation delta is too small, a {}x{} grid exceeds {} points",
        nu,
        nv,
        MAX_SAMPLES
    );
    Ok((nu, nv))
}

fn too_small<T: ToPrimitive>(delta: T) -> anyhow::Error {
    anyhow::anyhow!(
        "Evaluation delta is too small, {} yields more than {} points",
        delta.to_f64().unwrap_or_default(),
        MAX_SAMPLES
    )
}

/// Ensure the evaluation delta lies in the open interval (0, 1)
pub fn check_delta<T: RealField + Copy>(delta: T) -> anyhow::Result<()> {
    anyhow::ensure!(
        delta > T::zero() && delta < T::one(),
        "Evaluation delta should be between 0.0 and 1.0"
    );
    Ok(())
}
