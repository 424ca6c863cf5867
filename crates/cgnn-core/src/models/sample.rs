//! Named N×K observation matrix.

use std::collections::HashSet;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

use crate::errors::{CgnnError, CgnnResult};

/// An ordered set of N observations of K named variables.
///
/// Construction guarantees at least one row, one name per column, unique names,
/// and finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    names: Vec<String>,
    values: Array2<f64>,
}

impl Sample {
    pub fn new(names: Vec<String>, values: Array2<f64>) -> CgnnResult<Self> {
        if names.len() != values.ncols() {
            return Err(CgnnError::shape(format!(
                "{} column names for {} columns",
                names.len(),
                values.ncols()
            )));
        }
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(CgnnError::shape("sample must have at least one row and one column"));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(CgnnError::shape(format!("duplicate column name '{name}'")));
            }
        }
        if let Some(((row, col), value)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(CgnnError::shape(format!(
                "non-finite value {value} at row {row}, column '{}'",
                names[col]
            )));
        }
        Ok(Self { names, values })
    }

    /// Build from named columns of equal length.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> CgnnResult<Self> {
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if let Some((name, col)) = columns.iter().find(|(_, c)| c.len() != rows) {
            return Err(CgnnError::shape(format!(
                "column '{name}' has {} rows, expected {rows}",
                col.len()
            )));
        }
        let mut values = Array2::zeros((rows, columns.len()));
        for (j, (_, col)) in columns.iter().enumerate() {
            for (i, v) in col.iter().enumerate() {
                values[[i, j]] = *v;
            }
        }
        let names = columns.into_iter().map(|(name, _)| name).collect();
        Self::new(names, values)
    }

    /// Two-column sample `[A, B]` for pairwise scoring.
    pub fn from_pair(a: &[f64], b: &[f64]) -> CgnnResult<Self> {
        if a.len() != b.len() {
            return Err(CgnnError::shape(format!(
                "pair lengths differ: {} vs {}",
                a.len(),
                b.len()
            )));
        }
        Self::from_columns(vec![("A".to_string(), a.to_vec()), ("B".to_string(), b.to_vec())])
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    pub fn column_index(&self, name: &str) -> CgnnResult<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| CgnnError::shape(format!("no column named '{name}'")))
    }

    pub fn column(&self, name: &str) -> CgnnResult<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.values.column(idx))
    }

    /// Restrict to the named columns, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> CgnnResult<Sample> {
        let indices = names
            .iter()
            .map(|n| self.column_index(n.as_ref()))
            .collect::<CgnnResult<Vec<_>>>()?;
        let values = self.values.select(Axis(1), &indices);
        let names = names.iter().map(|n| n.as_ref().to_string()).collect();
        Sample::new(names, values)
    }

    /// Same sample with the two columns of a pair swapped. Fails unless K = 2.
    pub fn swapped(&self) -> CgnnResult<Sample> {
        if self.ncols() != 2 {
            return Err(CgnnError::shape(format!(
                "swap needs exactly 2 columns, got {}",
                self.ncols()
            )));
        }
        let values = self.values.select(Axis(1), &[1, 0]);
        Ok(Sample {
            names: vec![self.names[1].clone(), self.names[0].clone()],
            values,
        })
    }

    /// Uniform random subset of `max_rows` rows without replacement.
    /// Returns an unchanged copy when the sample is already small enough.
    pub fn subsample<R: Rng + ?Sized>(&self, max_rows: usize, rng: &mut R) -> Sample {
        if self.nrows() <= max_rows {
            return self.clone();
        }
        let rows = rand::seq::index::sample(rng, self.nrows(), max_rows).into_vec();
        Sample {
            names: self.names.clone(),
            values: self.values.select(Axis(0), &rows),
        }
    }

    /// Columns shifted to zero mean and scaled to unit variance.
    /// Constant columns are only centered.
    pub fn standardized(&self) -> Sample {
        let mut values = self.values.clone();
        let n = values.nrows() as f64;
        for mut col in values.columns_mut() {
            let mean = col.sum() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            let scale = if std > f64::EPSILON { 1.0 / std } else { 1.0 };
            col.mapv_inplace(|v| (v - mean) * scale);
        }
        Sample {
            names: self.names.clone(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample(rows: usize) -> Sample {
        let a: Vec<f64> = (0..rows).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..rows).map(|i| 2.0 * i as f64 + 1.0).collect();
        Sample::from_pair(&a, &b).unwrap()
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = Sample::from_pair(&[1.0, f64::NAN], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, CgnnError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Sample::from_columns(vec![
            ("x".to_string(), vec![1.0]),
            ("x".to_string(), vec![2.0]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn subsample_draws_distinct_rows() {
        let s = sample(100);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sub = s.subsample(30, &mut rng);
        assert_eq!(sub.nrows(), 30);
        let mut firsts: Vec<i64> = sub.values().column(0).iter().map(|v| *v as i64).collect();
        firsts.sort_unstable();
        firsts.dedup();
        assert_eq!(firsts.len(), 30, "rows must be drawn without replacement");
        // Rows stay intact.
        for row in sub.values().rows() {
            assert_eq!(row[1], 2.0 * row[0] + 1.0);
        }
    }

    #[test]
    fn subsample_below_limit_is_identity() {
        let s = sample(10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(s.subsample(50, &mut rng), s);
    }

    #[test]
    fn standardized_columns_have_unit_variance() {
        let s = sample(50).standardized();
        for col in s.values().columns() {
            let n = col.len() as f64;
            let mean = col.sum() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-10);
            assert!((var - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn swapped_exchanges_names_and_values() {
        let s = sample(5);
        let t = s.swapped().unwrap();
        assert_eq!(t.names(), &["B".to_string(), "A".to_string()]);
        assert_eq!(t.values().column(0), s.values().column(1));
    }
}
