//! Economic series alignment.
//!
//! Takes the two raw annual tables (external debt in US$ billions, GDP in
//! US$ millions), coerces their locale-formatted value cells to floats,
//! inner-joins them on the year key, and derives the debt/GDP ratio as a
//! percentage. The merged series is built once and read-only afterwards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PipelineError;

/// One raw annual table as extracted from the source: every row is a
/// `(year cell, value cell)` pair, the first row being the extraction's
/// header artifact.
#[derive(Debug, Clone, Default)]
pub struct RawSeriesTable {
    pub rows: Vec<(String, String)>,
}

/// One aligned year of the merged series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicObservation {
    pub year: i32,
    pub debt_billions_usd: f64,
    pub gdp_millions_usd: f64,
    pub ratio_percent: f64,
}

/// Align the debt and GDP tables into one ratio series, ascending by year.
///
/// Drops each table's header row, coerces cells, and inner-joins on year:
/// years present in only one source contribute no ratio and are dropped.
///
/// # Returns
/// The merged series, or `NumericCoercion` for an uncoercible cell,
/// `UndefinedRatio` when GDP is zero for a joined year, and `EmptySeries`
/// when the join has no rows (typically a year-format mismatch upstream).
pub fn align(
    debt: &RawSeriesTable,
    gdp: &RawSeriesTable,
) -> Result<Vec<EconomicObservation>, PipelineError> {
    let debt_by_year = coerce_table(debt)?;
    let gdp_by_year = coerce_table(gdp)?;

    let mut series = Vec::new();
    for (year, debt_value) in &debt_by_year {
        let Some(gdp_value) = gdp_by_year.get(year) else {
            continue;
        };
        if *gdp_value == 0.0 {
            return Err(PipelineError::UndefinedRatio { year: *year });
        }
        series.push(EconomicObservation {
            year: *year,
            debt_billions_usd: *debt_value,
            gdp_millions_usd: *gdp_value,
            ratio_percent: derive_ratio(*debt_value, *gdp_value),
        });
    }

    if series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }

    tracing::debug!(
        years = series.len(),
        first = series[0].year,
        last = series[series.len() - 1].year,
        "aligned economic series"
    );
    Ok(series)
}

/// The observation with the largest debt/GDP ratio, if any.
pub fn max_ratio(series: &[EconomicObservation]) -> Option<&EconomicObservation> {
    series
        .iter()
        .max_by(|a, b| a.ratio_percent.total_cmp(&b.ratio_percent))
}

/// Debt is in billions, GDP in millions; the ratio is a percentage.
fn derive_ratio(debt_billions: f64, gdp_millions: f64) -> f64 {
    debt_billions * 1_000.0 / gdp_millions * 100.0
}

/// Drop the header row and coerce the remaining rows into a year-keyed
/// map. BTreeMap keeps the output ascending by year.
fn coerce_table(table: &RawSeriesTable) -> Result<BTreeMap<i32, f64>, PipelineError> {
    let mut by_year = BTreeMap::new();
    for (year_cell, value_cell) in table.rows.iter().skip(1) {
        let year: i32 =
            year_cell
                .trim()
                .parse()
                .map_err(|_| PipelineError::NumericCoercion {
                    cell: year_cell.clone(),
                })?;
        by_year.insert(year, coerce_value(value_cell)?);
    }
    Ok(by_year)
}

/// Coerce one locale-formatted numeric cell ("." thousands separator, ","
/// decimal separator, or plain integer) to a float.
///
/// The separators are undone by explicit string transform before parsing;
/// a generic float parse would read "1.234,5" as garbage.
fn coerce_value(cell: &str) -> Result<f64, PipelineError> {
    let plain = cell.trim().replace('.', "").replace(',', ".");
    plain.parse().map_err(|_| PipelineError::NumericCoercion {
        cell: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> RawSeriesTable {
        RawSeriesTable {
            rows: rows
                .iter()
                .map(|(y, v)| (y.to_string(), v.to_string()))
                .collect(),
        }
    }

    const HEADER: (&str, &str) = ("Ano", "Valor");

    #[test]
    fn ratio_formula_is_exact() {
        // debt=100.0 billions, gdp=500.0 millions -> 100.0*1000/500.0*100.
        let debt = table(&[HEADER, ("2000", "100,0")]);
        let gdp = table(&[HEADER, ("2000", "500,0")]);
        let series = align(&debt, &gdp).unwrap();
        assert_eq!(series[0].ratio_percent, 20000.0);
    }

    #[test]
    fn join_keeps_only_shared_years() {
        let debt = table(&[HEADER, ("2000", "1,0"), ("2001", "2,0"), ("2002", "3,0")]);
        let gdp = table(&[HEADER, ("2001", "10,0"), ("2002", "20,0"), ("2003", "30,0")]);
        let series = align(&debt, &gdp).unwrap();
        let years: Vec<i32> = series.iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2001, 2002]);
    }

    #[test]
    fn output_is_sorted_ascending_by_year() {
        let debt = table(&[HEADER, ("2002", "3,0"), ("2000", "1,0"), ("2001", "2,0")]);
        let gdp = table(&[HEADER, ("2001", "10,0"), ("2002", "20,0"), ("2000", "5,0")]);
        let series = align(&debt, &gdp).unwrap();
        let years: Vec<i32> = series.iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002]);
    }

    #[test]
    fn coerces_locale_thousands_and_decimal_separators() {
        let debt = table(&[HEADER, ("1985", "105.171,0")]);
        let gdp = table(&[HEADER, ("1985", "222.942,8")]);
        let series = align(&debt, &gdp).unwrap();
        assert_eq!(series[0].debt_billions_usd, 105171.0);
        assert_eq!(series[0].gdp_millions_usd, 222942.8);
    }

    #[test]
    fn coerces_integer_only_cells() {
        let debt = table(&[HEADER, ("1985", "105")]);
        let gdp = table(&[HEADER, ("1985", "222942")]);
        let series = align(&debt, &gdp).unwrap();
        assert_eq!(series[0].debt_billions_usd, 105.0);
    }

    #[test]
    fn non_numeric_value_cell_fails() {
        let debt = table(&[HEADER, ("1985", "n/a")]);
        let gdp = table(&[HEADER, ("1985", "1,0")]);
        let err = align(&debt, &gdp).unwrap_err();
        match err {
            PipelineError::NumericCoercion { cell } => assert_eq!(cell, "n/a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_year_cell_fails() {
        let debt = table(&[HEADER, ("MCMLXXXV", "1,0")]);
        let gdp = table(&[HEADER, ("1985", "1,0")]);
        assert!(matches!(
            align(&debt, &gdp),
            Err(PipelineError::NumericCoercion { .. })
        ));
    }

    #[test]
    fn disjoint_years_raise_empty_series() {
        let debt = table(&[HEADER, ("1985", "1,0")]);
        let gdp = table(&[HEADER, ("1990", "1,0")]);
        assert!(matches!(align(&debt, &gdp), Err(PipelineError::EmptySeries)));
    }

    #[test]
    fn zero_gdp_raises_undefined_ratio() {
        let debt = table(&[HEADER, ("1985", "1,0")]);
        let gdp = table(&[HEADER, ("1985", "0,0")]);
        match align(&debt, &gdp).unwrap_err() {
            PipelineError::UndefinedRatio { year } => assert_eq!(year, 1985),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn max_ratio_finds_the_peak_year() {
        let debt = table(&[HEADER, ("2000", "1,0"), ("2001", "9,0"), ("2002", "2,0")]);
        let gdp = table(&[HEADER, ("2000", "10,0"), ("2001", "10,0"), ("2002", "10,0")]);
        let series = align(&debt, &gdp).unwrap();
        assert_eq!(max_ratio(&series).unwrap().year, 2001);
    }

    #[test]
    fn max_ratio_of_empty_series_is_none() {
        assert!(max_ratio(&[]).is_none());
    }
}
