//! Second pass: sparse tables into dense arrays.
//!
//! Every array starts out as NaN. Each cell is then looked up by re-deriving
//! its key from the coordinate axes, so cells no row mentioned stay NaN no
//! matter in which order rows arrived.

use ndarray::{Array3, Array4};

use crate::key::F64Key;
use crate::text::sparse::{CellKey, SparseTable};

/// Dense arrays built from a [`SparseTable`].
#[derive(Debug)]
pub struct DenseArrays {
    pub obs: Array3<f64>,
    pub deterministic: Array3<f64>,
    pub pit: Option<Array3<f64>>,
    pub threshold_scores: Array4<f64>,
    pub quantile_scores: Array4<f64>,
}

/// Lay out a sparse table on its `[date, offset, location]` axes.
pub fn assemble(table: &SparseTable) -> DenseArrays {
    let locations = table.registry.locations();
    let dims = (table.dates.len(), table.offsets.len(), locations.len());
    let thresholds: Vec<F64Key> = table.thresholds.iter().copied().collect();
    let quantiles: Vec<F64Key> = table.quantiles.iter().copied().collect();

    let mut dense = DenseArrays {
        obs: Array3::from_elem(dims, f64::NAN),
        deterministic: Array3::from_elem(dims, f64::NAN),
        pit: table.pit.as_ref().map(|_| Array3::from_elem(dims, f64::NAN)),
        threshold_scores: Array4::from_elem((dims.0, dims.1, dims.2, thresholds.len()), f64::NAN),
        quantile_scores: Array4::from_elem((dims.0, dims.1, dims.2, quantiles.len()), f64::NAN),
    };

    for (d, &date) in table.dates.iter().enumerate() {
        for (o, offset) in table.offsets.iter().enumerate() {
            for (s, location) in locations.iter().enumerate() {
                let key = CellKey::new(date, offset.value(), location);

                if let Some(&value) = table.obs.get(&key) {
                    dense.obs[[d, o, s]] = value;
                }
                if let Some(&value) = table.fcst.get(&key) {
                    dense.deterministic[[d, o, s]] = value;
                }
                if let (Some(pit), Some(values)) = (dense.pit.as_mut(), table.pit.as_ref()) {
                    if let Some(&value) = values.get(&key) {
                        pit[[d, o, s]] = value;
                    }
                }
                for (t, threshold) in thresholds.iter().enumerate() {
                    if let Some(&value) = table.cdf.get(&(key, *threshold)) {
                        dense.threshold_scores[[d, o, s, t]] = value;
                    }
                }
                for (q, quantile) in quantiles.iter().enumerate() {
                    if let Some(&value) = table.x.get(&(key, *quantile)) {
                        dense.quantile_scores[[d, o, s, q]] = value;
                    }
                }
            }
        }
    }
    dense
}
