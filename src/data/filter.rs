use crate::error::{PipelineError, PipelineResult};

use super::model::{AnimalPolicy, Listing, ListingStore};

// ---------------------------------------------------------------------------
// Filter criteria: what the user selected in the side panel
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range selected with a pair of sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        ValueRange { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Pet policy selection. `Any` disables the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimalFilter {
    #[default]
    Any,
    Accepted,
    NotAccepted,
}

impl AnimalFilter {
    pub const ALL: [AnimalFilter; 3] = [
        AnimalFilter::Any,
        AnimalFilter::Accepted,
        AnimalFilter::NotAccepted,
    ];

    pub fn matches(self, policy: AnimalPolicy) -> bool {
        match self {
            AnimalFilter::Any => true,
            AnimalFilter::Accepted => policy == AnimalPolicy::Accepted,
            AnimalFilter::NotAccepted => policy == AnimalPolicy::NotAccepted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimalFilter::Any => "Any",
            AnimalFilter::Accepted => "Accepted",
            AnimalFilter::NotAccepted => "Not accepted",
        }
    }
}

/// The full set of user constraints. Rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// `None` means every city.
    pub city: Option<String>,
    pub rooms: ValueRange<u32>,
    pub rent: ValueRange<f64>,
    pub animals: AnimalFilter,
}

impl FilterCriteria {
    /// Criteria that let every listing of `store` through: the initial
    /// position of the side panel widgets.
    pub fn full_range(store: &ListingStore) -> Self {
        let (min_rooms, max_rooms) = store.room_bounds().unwrap_or((0, 0));
        let (min_rent, max_rent) = store.rent_bounds().unwrap_or((0.0, 0.0));
        FilterCriteria {
            city: None,
            rooms: ValueRange::new(min_rooms, max_rooms),
            rent: ValueRange::new(min_rent.floor(), max_rent.ceil()),
            animals: AnimalFilter::Any,
        }
    }

    /// Reject ranges that cannot match anything by construction.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.rooms.min > self.rooms.max {
            return Err(PipelineError::InvalidArgument(format!(
                "room range {}..={} has min > max",
                self.rooms.min, self.rooms.max
            )));
        }
        if !self.rent.min.is_finite() || !self.rent.max.is_finite() {
            return Err(PipelineError::InvalidArgument(format!(
                "rent range {}..={} is not finite",
                self.rent.min, self.rent.max
            )));
        }
        if self.rent.min > self.rent.max {
            return Err(PipelineError::InvalidArgument(format!(
                "rent range {}..={} has min > max",
                self.rent.min, self.rent.max
            )));
        }
        Ok(())
    }

    fn city_matches(&self, listing: &Listing) -> bool {
        self.city.as_deref().map_or(true, |c| listing.city == c)
    }
}

// ---------------------------------------------------------------------------
// FilteredView: an ordered subset of the store
// ---------------------------------------------------------------------------

/// Read-only selection of store rows, kept as indices in store order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    store: &'a ListingStore,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over every row of the store.
    pub fn all(store: &'a ListingStore) -> Self {
        FilteredView {
            store,
            indices: (0..store.len()).collect(),
        }
    }

    /// Store indices of the visible rows.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// Visible listings, in store order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        let store = self.store;
        self.indices.iter().map(move |&i| &store.listings()[i])
    }

    /// Visible listings paired with their store index.
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &'a Listing)> + '_ {
        let store = self.store;
        self.indices.iter().map(move |&i| (i, &store.listings()[i]))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn retain(mut self, keep: impl Fn(&Listing) -> bool) -> Self {
        let store = self.store;
        self.indices.retain(|&i| keep(&store.listings()[i]));
        self
    }
}

// ---------------------------------------------------------------------------
// Filter Engine
// ---------------------------------------------------------------------------

/// Apply every predicate of `criteria` to the store.
///
/// City, room and rent predicates run in one pass; the animal predicate runs
/// as a second stage over that narrowed view, so all four combine with AND.
pub fn apply<'a>(store: &'a ListingStore, criteria: &FilterCriteria) -> PipelineResult<FilteredView<'a>> {
    criteria.validate()?;
    let narrowed = select_listings(store, criteria);
    Ok(restrict_animals(narrowed, criteria.animals))
}

/// City and animal predicates only; room and rent ranges are ignored.
///
/// This is the base the mean-rent-per-city chart summarises, so that chart
/// keeps showing every rent level while the sliders move.
pub fn apply_base<'a>(store: &'a ListingStore, criteria: &FilterCriteria) -> FilteredView<'a> {
    let by_city = FilteredView::all(store).retain(|l| criteria.city_matches(l));
    restrict_animals(by_city, criteria.animals)
}

/// City, room and rent predicates.
pub fn select_listings<'a>(store: &'a ListingStore, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::all(store).retain(|l| {
        criteria.city_matches(l)
            && criteria.rooms.contains(l.rooms)
            && criteria.rent.contains(l.rent_amount)
    })
}

/// Animal predicate over an existing view.
pub fn restrict_animals(view: FilteredView<'_>, filter: AnimalFilter) -> FilteredView<'_> {
    if filter == AnimalFilter::Any {
        return view;
    }
    view.retain(|l| filter.matches(l.animals))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::tests::{listing, scenario_store};

    fn criteria(city: Option<&str>, rooms: (u32, u32), rent: (f64, f64)) -> FilterCriteria {
        FilterCriteria {
            city: city.map(str::to_string),
            rooms: ValueRange::new(rooms.0, rooms.1),
            rent: ValueRange::new(rent.0, rent.1),
            animals: AnimalFilter::Any,
        }
    }

    fn with_animals(mut l: Listing, animals: AnimalPolicy) -> Listing {
        l.animals = animals;
        l
    }

    #[test]
    fn scenario_keeps_all_rows() {
        let store = scenario_store();
        let view = apply(&store, &criteria(None, (1, 3), (0.0, 5000.0))).unwrap();
        assert_eq!(view.indices(), [0, 1, 2]);
    }

    #[test]
    fn city_is_exact_match() {
        let store = ListingStore::new(vec![
            listing("Rio", 1, 30.0, 1000.0),
            listing("Rio de Janeiro", 1, 30.0, 1000.0),
            listing("rio", 1, 30.0, 1000.0),
        ]);
        let view = apply(&store, &criteria(Some("Rio"), (0, 10), (0.0, 1e6))).unwrap();
        assert_eq!(view.indices(), [0]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let store = ListingStore::new(vec![
            listing("A", 2, 30.0, 999.99),
            listing("A", 2, 30.0, 1000.0),
            listing("A", 3, 30.0, 2000.0),
            listing("A", 3, 30.0, 2000.01),
            listing("A", 1, 30.0, 1500.0),
            listing("A", 4, 30.0, 1500.0),
        ]);
        let view = apply(&store, &criteria(None, (2, 3), (1000.0, 2000.0))).unwrap();
        assert_eq!(view.indices(), [1, 2]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let store = scenario_store();
        let view = apply(&store, &criteria(Some("Nowhere"), (0, 10), (0.0, 1e6))).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let store = scenario_store();
        let err = apply(&store, &criteria(None, (3, 1), (0.0, 5000.0))).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
        let err = apply(&store, &criteria(None, (1, 3), (5000.0, 0.0))).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
        let err = apply(&store, &criteria(None, (1, 3), (0.0, f64::NAN))).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    // The dashboard this replaces applied the pet filter to the unfiltered
    // table, so it never narrowed the histogram. Here it composes with the
    // other predicates.
    #[test]
    fn animal_predicate_composes_with_other_filters() {
        let store = ListingStore::new(vec![
            with_animals(listing("A", 2, 50.0, 1000.0), AnimalPolicy::Accepted),
            with_animals(listing("A", 2, 50.0, 1200.0), AnimalPolicy::NotAccepted),
            with_animals(listing("B", 2, 50.0, 1100.0), AnimalPolicy::Accepted),
            with_animals(listing("A", 5, 50.0, 1000.0), AnimalPolicy::Accepted),
        ]);
        let mut c = criteria(Some("A"), (1, 3), (0.0, 5000.0));
        c.animals = AnimalFilter::Accepted;
        assert_eq!(apply(&store, &c).unwrap().indices(), [0]);

        c.animals = AnimalFilter::NotAccepted;
        assert_eq!(apply(&store, &c).unwrap().indices(), [1]);

        // Same result as running the two stages explicitly.
        let staged = restrict_animals(select_listings(&store, &c), c.animals);
        assert_eq!(staged.indices(), [1]);
    }

    #[test]
    fn base_view_ignores_room_and_rent_ranges() {
        let store = ListingStore::new(vec![
            with_animals(listing("A", 1, 50.0, 100.0), AnimalPolicy::Accepted),
            with_animals(listing("A", 9, 50.0, 90000.0), AnimalPolicy::Accepted),
            with_animals(listing("A", 2, 50.0, 1000.0), AnimalPolicy::NotAccepted),
            with_animals(listing("B", 2, 50.0, 1000.0), AnimalPolicy::Accepted),
        ]);
        let mut c = criteria(Some("A"), (2, 3), (500.0, 2000.0));
        c.animals = AnimalFilter::Accepted;
        assert_eq!(apply_base(&store, &c).indices(), [0, 1]);
        assert!(apply(&store, &c).unwrap().is_empty());
    }

    #[test]
    fn full_range_lets_everything_through() {
        let store = ListingStore::new(vec![
            listing("A", 1, 30.0, 450.5),
            listing("B", 7, 300.0, 15000.25),
        ]);
        let c = FilterCriteria::full_range(&store);
        assert_eq!(c.rooms, ValueRange::new(1, 7));
        assert_eq!(c.rent, ValueRange::new(450.0, 15001.0));
        assert_eq!(apply(&store, &c).unwrap().len(), 2);
    }

    #[test]
    fn full_range_on_empty_store_is_valid() {
        let store = ListingStore::new(Vec::new());
        let c = FilterCriteria::full_range(&store);
        assert!(apply(&store, &c).unwrap().is_empty());
    }

    fn arb_listing() -> impl Strategy<Value = Listing> {
        (
            prop::sample::select(vec!["A", "B", "C"]),
            0u32..8,
            1.0..400.0f64,
            0.0..20000.0f64,
            any::<bool>(),
        )
            .prop_map(|(city, rooms, area, rent, pets)| Listing {
                city: city.to_string(),
                rooms,
                area,
                rent_amount: rent,
                animals: if pets {
                    AnimalPolicy::Accepted
                } else {
                    AnimalPolicy::NotAccepted
                },
            })
    }

    fn arb_animal_filter() -> impl Strategy<Value = AnimalFilter> {
        prop::sample::select(AnimalFilter::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_rows_satisfy_ranges(
            listings in prop::collection::vec(arb_listing(), 0..60),
            r in (0u32..8, 0u32..8),
            p in (0.0..20000.0f64, 0.0..20000.0f64),
            animals in arb_animal_filter(),
        ) {
            let store = ListingStore::new(listings);
            let mut c = criteria(None, (r.0.min(r.1), r.0.max(r.1)), (p.0.min(p.1), p.0.max(p.1)));
            c.animals = animals;
            let view = apply(&store, &c).unwrap();
            for l in view.rows() {
                prop_assert!(c.rooms.min <= l.rooms && l.rooms <= c.rooms.max);
                prop_assert!(c.rent.min <= l.rent_amount && l.rent_amount <= c.rent.max);
                prop_assert!(animals.matches(l.animals));
            }
        }

        #[test]
        fn prop_absent_city_is_a_no_op(
            listings in prop::collection::vec(arb_listing(), 0..60),
            animals in arb_animal_filter(),
        ) {
            let store = ListingStore::new(listings);
            let mut c = criteria(None, (1, 5), (1000.0, 15000.0));
            c.animals = animals;
            let expected = store
                .listings()
                .iter()
                .filter(|l| c.rooms.contains(l.rooms) && c.rent.contains(l.rent_amount) && animals.matches(l.animals))
                .count();
            prop_assert_eq!(apply(&store, &c).unwrap().len(), expected);
        }

        #[test]
        fn prop_filtering_is_idempotent(
            listings in prop::collection::vec(arb_listing(), 0..60),
            city in prop::option::of(prop::sample::select(vec!["A", "B", "C"])),
            animals in arb_animal_filter(),
        ) {
            let store = ListingStore::new(listings);
            let mut c = criteria(city, (0, 4), (0.0, 12000.0));
            c.animals = animals;
            let first = apply(&store, &c).unwrap().into_indices();
            let second = apply(&store, &c).unwrap().into_indices();
            prop_assert!(first.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(first, second);
        }
    }
}
