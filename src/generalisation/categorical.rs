//! Categorical generalisation by numeric binning
//!
//! Partitions numeric cells into intervals, either a requested count of
//! equal-width bins spanning the observed range or an explicit ascending
//! sequence of edges. Used both standalone and by the sanitisation rule
//! engine's `categorise` method.

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use crate::domain::{Series, Value};
use serde::{Deserialize, Serialize};

/// Bin definition for [`generalise_categorical`]
///
/// Deserialises untagged, so a rule parameter may be authored either as a
/// plain integer (`bins = 3`) or as an edge array (`bins = [0, 5, 10, 20]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bins {
    /// Number of equal-width bins over the observed range
    Count(usize),
    /// Explicit ascending bin edges
    Edges(Vec<f64>),
}

/// Generalise a numeric series by binning its values into categories.
///
/// Each bin is the half-open interval `(lo, hi]` between two consecutive
/// edges, with the very first edge also inclusive, so the covered span is
/// `[first, last]` and the rightmost edge is inclusive. Present values
/// outside every bin become missing, as do non-numeric cells; missing cells
/// pass through.
///
/// With [`Bins::Count`], the edges are inferred from the observed range of
/// the column; a single-point range is widened so the lone value still lands
/// in a bin.
///
/// # Errors
///
/// - [`AnonkitError::InvalidBinCount`] for a bin count of zero
/// - [`AnonkitError::EmptyColumn`] for a count-based binning over a column
///   with no observed numeric values
/// - [`AnonkitError::InvalidBinEdges`] for fewer than two edges or a
///   non-ascending sequence
/// - [`AnonkitError::LabelCountMismatch`] if `labels` is supplied and its
///   length differs from the number of bins
///
/// # Examples
///
/// ```
/// use anonkit::domain::{Series, Value};
/// use anonkit::generalisation::{generalise_categorical, Bins};
///
/// # fn example() -> anonkit::domain::Result<()> {
/// let data = Series::from_numbers("income", [1.0, 5.0, 10.0, 15.0, 20.0]);
/// let labels = vec!["Low".to_string(), "Medium".to_string(), "High".to_string()];
/// let binned = generalise_categorical(
///     &data,
///     &Bins::Edges(vec![0.0, 5.0, 10.0, 20.0]),
///     Some(labels.as_slice()),
/// )?;
///
/// assert_eq!(binned.get(0), Some(&Value::Text("Low".into())));
/// assert_eq!(binned.get(4), Some(&Value::Text("High".into())));
/// # Ok(())
/// # }
/// ```
pub fn generalise_categorical(
    data: &Series,
    bins: &Bins,
    labels: Option<&[String]>,
) -> Result<Series> {
    let edges = match bins {
        Bins::Count(0) => return Err(AnonkitError::InvalidBinCount(0)),
        Bins::Count(count) => equal_width_edges(data, *count)?,
        Bins::Edges(edges) => {
            if edges.len() < 2 || edges.windows(2).any(|w| w[0] >= w[1]) {
                return Err(AnonkitError::InvalidBinEdges);
            }
            edges.clone()
        }
    };

    let bin_count = edges.len() - 1;
    if let Some(labels) = labels {
        if labels.len() != bin_count {
            return Err(AnonkitError::LabelCountMismatch {
                bins: bin_count,
                labels: labels.len(),
            });
        }
    }
    let labels: Vec<String> = match labels {
        Some(labels) => labels.to_vec(),
        None => interval_labels(&edges),
    };

    let values = data
        .iter()
        .map(|v| match v {
            Value::Number(n) => match bin_index(*n, &edges) {
                Some(i) => Value::Text(labels[i].clone()),
                None => Value::Missing,
            },
            _ => Value::Missing,
        })
        .collect();
    Ok(Series::new(data.name(), values))
}

/// Equal-width edges spanning the observed range of the column.
fn equal_width_edges(data: &Series, count: usize) -> Result<Vec<f64>> {
    let observed: Vec<f64> = data
        .iter()
        .filter_map(|v| v.as_number().filter(|n| n.is_finite()))
        .collect();
    if observed.is_empty() {
        return Err(AnonkitError::EmptyColumn {
            column: data.name().to_string(),
        });
    }

    let mut lo = observed.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / count as f64;
    let mut edges: Vec<f64> = (0..count).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    Ok(edges)
}

/// Index of the bin containing `n`, if any.
fn bin_index(n: f64, edges: &[f64]) -> Option<usize> {
    if !n.is_finite() {
        return None;
    }
    let last = edges.len() - 1;
    if n < edges[0] || n > edges[last] {
        return None;
    }
    (0..last).find(|&i| n <= edges[i + 1] && (i == 0 || n > edges[i]))
}

/// Default labels: the interval text of each bin.
fn interval_labels(edges: &[f64]) -> Vec<String> {
    (0..edges.len() - 1)
        .map(|i| {
            let open = if i == 0 { '[' } else { '(' };
            format!(
                "{open}{}, {}]",
                Value::Number(edges[i]),
                Value::Number(edges[i + 1])
            )
        })
        .collect()
}
