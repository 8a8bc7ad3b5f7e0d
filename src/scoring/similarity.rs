use super::error::ScoringError;

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// Returns `0.0` when either vector has zero magnitude or non-finite components.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    Ok(dot_and_norms(a, b)?.cosine().unwrap_or(0.0))
}

/// Similarity on a 0-100 scale: `(cosine + 1) / 2 * 100`, rounded to two decimals.
///
/// A zero-magnitude or non-finite vector carries no content and scores `0.0`.
pub fn similarity_percent(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    let Some(cosine) = dot_and_norms(a, b)?.cosine() else {
        return Ok(0.0);
    };
    Ok(round2((cosine + 1.0) / 2.0 * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

struct Products {
    dot: f64,
    norm_a: f64,
    norm_b: f64,
}

impl Products {
    fn cosine(&self) -> Option<f64> {
        let denom = self.norm_a.sqrt() * self.norm_b.sqrt();
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }
        let cosine = self.dot / denom;
        if cosine.is_nan() {
            return None;
        }
        // Rounding can push unit vectors slightly past +-1.
        Some(cosine.clamp(-1.0, 1.0))
    }
}

fn dot_and_norms(a: &[f32], b: &[f32]) -> Result<Products, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut products = Products {
        dot: 0.0,
        norm_a: 0.0,
        norm_b: 0.0,
    };
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        products.dot += x * y;
        products.norm_a += x * x;
        products.norm_b += y * y;
    }
    Ok(products)
}
