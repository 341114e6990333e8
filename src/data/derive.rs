use crate::error::{PipelineError, PipelineResult};

use super::filter::FilteredView;
use super::model::Listing;

/// One visible listing plus its computed rent per m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRow<'a> {
    /// Index of the listing in the store.
    pub index: usize,
    pub listing: &'a Listing,
    pub rent_per_area: f64,
}

/// A filtered view extended with the `rent_per_area` column.
///
/// Always derived from the fully filtered view (city, rooms, rent, animals).
#[derive(Debug, Clone, Default)]
pub struct DerivedView<'a> {
    rows: Vec<DerivedRow<'a>>,
}

impl<'a> DerivedView<'a> {
    pub fn rows(&self) -> &[DerivedRow<'a>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Add `rent_amount / area` to every row of `view`.
///
/// A listing whose area is zero, negative or not a number fails the whole
/// stage with [`PipelineError::DivisionByZero`]; no row is silently dropped.
pub fn with_rent_per_area<'a>(view: &FilteredView<'a>) -> PipelineResult<DerivedView<'a>> {
    let rows = view
        .indexed_rows()
        .map(|(index, listing)| {
            if listing.area.is_nan() || listing.area <= 0.0 {
                return Err(PipelineError::DivisionByZero {
                    row: index,
                    area: listing.area,
                });
            }
            Ok(DerivedRow {
                index,
                listing,
                rent_per_area: listing.rent_amount / listing.area,
            })
        })
        .collect::<PipelineResult<Vec<_>>>()?;
    Ok(DerivedView { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{listing, scenario_store};
    use crate::data::model::ListingStore;

    #[test]
    fn scenario_rent_per_area() {
        let store = scenario_store();
        let derived = with_rent_per_area(&FilteredView::all(&store)).unwrap();
        let values: Vec<f64> = derived.rows().iter().map(|r| r.rent_per_area).collect();
        assert_eq!(values, vec![20.0, 30.0, 20.0]);
        // Other columns pass through untouched.
        assert_eq!(derived.rows()[1].listing, &store.listings()[1]);
        assert_eq!(derived.rows()[1].index, 1);
    }

    #[test]
    fn zero_area_fails_with_row_index() {
        let store = ListingStore::new(vec![
            listing("A", 1, 40.0, 800.0),
            listing("A", 1, 0.0, 800.0),
        ]);
        let err = with_rent_per_area(&FilteredView::all(&store)).unwrap_err();
        assert_eq!(err, PipelineError::DivisionByZero { row: 1, area: 0.0 });
    }

    #[test]
    fn nan_area_is_treated_as_missing() {
        let store = ListingStore::new(vec![listing("A", 1, f64::NAN, 800.0)]);
        let err = with_rent_per_area(&FilteredView::all(&store)).unwrap_err();
        assert!(matches!(err, PipelineError::DivisionByZero { row: 0, .. }));
    }

    #[test]
    fn empty_view_derives_empty() {
        let store = ListingStore::new(Vec::new());
        let derived = with_rent_per_area(&FilteredView::all(&store)).unwrap();
        assert!(derived.is_empty());
    }
}
