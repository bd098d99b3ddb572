use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::Result;

/// Scalar reductions over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Sum,
    Mean,
    Min,
    Max,
}

/// Apply a reduction to one column. `None` when the result is null
/// (empty or all-null input for everything but `Sum`).
pub fn reduce(df: &DataFrame, column: &str, op: Reduce) -> Result<Option<f64>> {
    let s = df.column(column)?.as_materialized_series();
    let val = match op {
        Reduce::Sum => s.sum_reduce()?,
        Reduce::Mean => s.mean_reduce(),
        Reduce::Min => s.min_reduce()?,
        Reduce::Max => s.max_reduce()?,
    };
    Ok(val.value().try_extract::<f64>().ok().filter(|f| !f.is_nan()))
}

/// Count occurrences of each non-null value.
///
/// Ordered by count, highest first; equal counts fall back to ascending value
/// so the first entry is a deterministic mode.
pub fn tally<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = Option<T>>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let mut entries: Vec<(T, usize)> = counts.into_iter().collect();
    // stable sort keeps the BTreeMap's ascending order within a count
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Most frequent non-null value; ties go to the smallest.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = Option<T>>,
{
    tally(values).into_iter().next().map(|(value, _)| value)
}

/// Tally a String column.
pub fn tally_str(df: &DataFrame, column: &str) -> Result<Vec<(String, usize)>> {
    let ca = df.column(column)?.as_materialized_series().str()?;
    Ok(tally(ca.into_iter().map(|v| v.map(str::to_string))))
}

pub fn mode_str(df: &DataFrame, column: &str) -> Result<Option<String>> {
    let ca = df.column(column)?.as_materialized_series().str()?;
    Ok(mode(ca.into_iter().map(|v| v.map(str::to_string))))
}

pub fn mode_i32(df: &DataFrame, column: &str) -> Result<Option<i32>> {
    let ca = df.column(column)?.as_materialized_series().i32()?;
    Ok(mode(ca.into_iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_orders_by_count_then_value() {
        let values = ["b", "a", "c", "b", "a", "b", "d"].map(Some);
        let counts = tally(values);
        assert_eq!(counts, vec![("b", 3), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_tally_skips_nulls() {
        let counts = tally([Some(3), None, Some(3), None, None]);
        assert_eq!(counts, vec![(3, 2)]);
    }

    #[test]
    fn test_mode_tie_goes_to_smallest() {
        assert_eq!(mode([Some(17), Some(8), Some(17), Some(8)]), Some(8));
        assert_eq!(mode([Some(10), Some(9), Some(10)]), Some(10));
        assert_eq!(mode(Vec::<Option<i32>>::new()), None);
    }

    #[test]
    fn test_reduce_numeric_column() -> Result<()> {
        let df = df!("d" => &[Some(100.0), None, Some(50.0), Some(30.0)])?;
        assert_eq!(reduce(&df, "d", Reduce::Sum)?, Some(180.0));
        assert_eq!(reduce(&df, "d", Reduce::Mean)?, Some(60.0));
        assert_eq!(reduce(&df, "d", Reduce::Min)?, Some(30.0));
        assert_eq!(reduce(&df, "d", Reduce::Max)?, Some(100.0));
        Ok(())
    }

    #[test]
    fn test_reduce_empty_column() -> Result<()> {
        let df = df!("d" => Vec::<f64>::new())?;
        assert_eq!(reduce(&df, "d", Reduce::Sum)?, Some(0.0));
        assert_eq!(reduce(&df, "d", Reduce::Mean)?, None);
        assert_eq!(reduce(&df, "d", Reduce::Max)?, None);
        Ok(())
    }

    #[test]
    fn test_column_tallies() -> Result<()> {
        let df = df!(
            "user" => &[Some("Subscriber"), Some("Customer"), None, Some("Subscriber")],
            "hour" => &[8, 17, 8, 9]
        )?;
        assert_eq!(
            tally_str(&df, "user")?,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(mode_i32(&df, "hour")?, Some(8));
        Ok(())
    }
}
