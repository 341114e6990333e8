use eframe::egui::Color32;

use crate::color::CategoryColors;
use crate::data::aggregate::{Reducer, group_reduce, sorted_by_key};
use crate::data::derive::with_rent_per_area;
use crate::data::filter::{self, FilterCriteria};
use crate::data::histogram::{self, HistogramBin};
use crate::data::model::ListingStore;
use crate::error::PipelineResult;
use crate::settings::Palettes;

// ---------------------------------------------------------------------------
// Chart datasets handed to the UI
// ---------------------------------------------------------------------------

/// Rent distribution: one coloured bar per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct RentHistogram {
    pub bins: Vec<HistogramBin>,
    /// Same length as `bins`.
    pub colors: Vec<Color32>,
}

/// One bar of a per-city chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CityBar {
    pub city: String,
    pub value: f64,
    pub color: Color32,
}

/// One bar of the room-count chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomBar {
    pub rooms: u32,
    pub count: usize,
    pub color: Color32,
}

/// Everything the central panel draws for one set of filter criteria.
///
/// Each chart carries its own result so that one failing stage (say, a
/// listing with zero area) leaves the other charts intact.
#[derive(Debug, Clone)]
pub struct DashboardViews {
    /// Store indices of listings passing every filter.
    pub visible_indices: Vec<usize>,
    pub rent_histogram: PipelineResult<RentHistogram>,
    /// Mean rent per city over the city/animal base, ignoring the sliders.
    pub mean_rent_by_city: Vec<CityBar>,
    /// Mean rent per m² per city over the fully filtered listings.
    pub rent_per_area_by_city: PipelineResult<Vec<CityBar>>,
    pub room_distribution: PipelineResult<Vec<RoomBar>>,
}

impl DashboardViews {
    /// Run the pipeline. Fails only when `criteria` itself is invalid.
    pub fn build(
        store: &ListingStore,
        criteria: &FilterCriteria,
        histogram_bins: usize,
        palettes: &Palettes,
    ) -> PipelineResult<Self> {
        let view = filter::apply(store, criteria)?;
        let base = filter::apply_base(store, criteria);
        let city_colors = CategoryColors::new(store.cities(), &palettes.city);

        let rents: Vec<f64> = view.rows().map(|l| l.rent_amount).collect();
        let rent_histogram = histogram::bin(&rents, histogram_bins).and_then(|bins| {
            let colors = palettes.rent.gradient(bins.len(), true)?;
            Ok(RentHistogram { bins, colors })
        });

        let base_rows: Vec<_> = base.rows().collect();
        let mean_rent_by_city = group_reduce(&base_rows, |l| l.city.clone(), |l| l.rent_amount, Reducer::Mean)
            .into_iter()
            .map(|row| CityBar {
                color: city_colors.color_for(&row.key),
                city: row.key,
                value: row.value,
            })
            .collect();

        let rent_per_area_by_city = with_rent_per_area(&view).map(|derived| {
            group_reduce(
                derived.rows(),
                |r| r.listing.city.clone(),
                |r| r.rent_per_area,
                Reducer::Mean,
            )
            .into_iter()
            .map(|row| CityBar {
                color: city_colors.color_for(&row.key),
                city: row.key,
                value: row.value,
            })
            .collect()
        });

        let rows: Vec<_> = view.rows().collect();
        let room_counts = sorted_by_key(group_reduce(&rows, |l| l.rooms, |_| 0.0, Reducer::Count));
        let room_distribution = if room_counts.is_empty() {
            Ok(Vec::new())
        } else {
            palettes.rooms.gradient(room_counts.len(), true).map(|colors| {
                room_counts
                    .into_iter()
                    .zip(colors)
                    .map(|(row, color)| RoomBar {
                        rooms: row.key,
                        count: row.members,
                        color,
                    })
                    .collect()
            })
        };

        for (chart, err) in [
            ("rent distribution", rent_histogram.as_ref().err()),
            ("rent per m²", rent_per_area_by_city.as_ref().err()),
            ("room distribution", room_distribution.as_ref().err()),
        ] {
            if let Some(e) = err {
                log::warn!("{chart} chart unavailable: {e}");
            }
        }
        log::debug!(
            "Rebuilt views: {} of {} listings visible",
            view.len(),
            store.len()
        );

        Ok(DashboardViews {
            visible_indices: view.into_indices(),
            rent_histogram,
            mean_rent_by_city,
            rent_per_area_by_city,
            room_distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{AnimalFilter, ValueRange};
    use crate::data::model::tests::{listing, scenario_store};
    use crate::error::PipelineError;
    use crate::settings::Settings;

    fn palettes() -> Palettes {
        Settings::default().palettes().unwrap()
    }

    fn open_criteria() -> FilterCriteria {
        FilterCriteria {
            city: None,
            rooms: ValueRange::new(1, 3),
            rent: ValueRange::new(0.0, 5000.0),
            animals: AnimalFilter::Any,
        }
    }

    fn values(bars: &[CityBar]) -> Vec<(&str, f64)> {
        bars.iter().map(|b| (b.city.as_str(), b.value)).collect()
    }

    #[test]
    fn scenario_views() {
        let store = scenario_store();
        let views = DashboardViews::build(&store, &open_criteria(), 2, &palettes()).unwrap();

        assert_eq!(views.visible_indices, vec![0, 1, 2]);
        assert_eq!(values(&views.mean_rent_by_city), vec![("A", 2000.0), ("B", 500.0)]);
        assert_eq!(
            values(views.rent_per_area_by_city.as_ref().unwrap()),
            vec![("A", 25.0), ("B", 20.0)]
        );

        let hist = views.rent_histogram.unwrap();
        let counts: Vec<usize> = hist.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(hist.colors.len(), 2);

        let rooms: Vec<(u32, usize)> = views
            .room_distribution
            .unwrap()
            .iter()
            .map(|b| (b.rooms, b.count))
            .collect();
        assert_eq!(rooms, vec![(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn city_colours_are_stable_across_filters() {
        let store = scenario_store();
        let p = palettes();
        let all = DashboardViews::build(&store, &open_criteria(), 5, &p).unwrap();
        let mut only_b = open_criteria();
        only_b.city = Some("B".to_string());
        let b = DashboardViews::build(&store, &only_b, 5, &p).unwrap();
        assert_eq!(all.mean_rent_by_city[1].color, b.mean_rent_by_city[0].color);
    }

    #[test]
    fn mean_rent_ignores_sliders() {
        let store = scenario_store();
        let mut c = open_criteria();
        c.rent = ValueRange::new(0.0, 600.0);
        let views = DashboardViews::build(&store, &c, 5, &palettes()).unwrap();
        assert_eq!(views.visible_indices, vec![2]);
        assert_eq!(values(&views.mean_rent_by_city), vec![("A", 2000.0), ("B", 500.0)]);
        assert_eq!(
            values(views.rent_per_area_by_city.as_ref().unwrap()),
            vec![("B", 20.0)]
        );
    }

    #[test]
    fn empty_selection_degrades_per_chart() {
        let store = scenario_store();
        let mut c = open_criteria();
        c.city = Some("Nowhere".to_string());
        let views = DashboardViews::build(&store, &c, 30, &palettes()).unwrap();
        assert!(views.visible_indices.is_empty());
        assert!(matches!(views.rent_histogram, Err(PipelineError::EmptyInput(_))));
        assert!(views.mean_rent_by_city.is_empty());
        assert_eq!(views.rent_per_area_by_city, Ok(Vec::new()));
        assert_eq!(views.room_distribution, Ok(Vec::new()));
    }

    #[test]
    fn zero_area_only_breaks_rent_per_area() {
        let store = ListingStore::new(vec![
            listing("A", 2, 50.0, 1000.0),
            listing("A", 2, 0.0, 1500.0),
        ]);
        let views = DashboardViews::build(&store, &open_criteria(), 4, &palettes()).unwrap();
        assert_eq!(
            views.rent_per_area_by_city,
            Err(PipelineError::DivisionByZero { row: 1, area: 0.0 })
        );
        assert!(views.rent_histogram.is_ok());
        assert_eq!(views.room_distribution.unwrap().len(), 1);
    }

    #[test]
    fn invalid_criteria_fail_the_build() {
        let store = scenario_store();
        let mut c = open_criteria();
        c.rooms = ValueRange::new(3, 1);
        assert!(matches!(
            DashboardViews::build(&store, &c, 30, &palettes()),
            Err(PipelineError::InvalidArgument(_))
        ));
    }
}
