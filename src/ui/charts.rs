use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::dashboard::{CityBar, DashboardViews, RentHistogram};
use crate::data::model::ListingStore;
use crate::error::PipelineResult;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel: the four charts and the listing table
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (store, views) = match (&state.store, &state.views) {
        (Some(store), Some(views)) => (store, views),
        (Some(_), None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Adjust the filters to show the charts");
            });
            return;
        }
        (None, _) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to explore listings  (File → Open…)");
            });
            return;
        }
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Rent distribution");
            with_chart(ui, &views.rent_histogram, rent_histogram);

            ui.heading("Mean rent per city");
            city_chart(ui, "mean_rent", &views.mean_rent_by_city, "Mean rent (R$)", true);

            ui.heading("Rent per m² per city");
            with_chart(ui, &views.rent_per_area_by_city, |ui, bars| {
                city_chart(ui, "rent_per_area", bars, "Rent per m² (R$)", false);
            });

            ui.heading("Room count distribution");
            with_chart(ui, &views.room_distribution, |ui, bars| {
                let bars = bars
                    .iter()
                    .map(|b| {
                        Bar::new(b.rooms as f64, b.count as f64)
                            .width(0.8)
                            .fill(b.color)
                            .name(format!("{} rooms", b.rooms))
                    })
                    .collect();
                show_bars(ui, "rooms", ["Rooms", "Listings"], BarChart::new(bars), None);
            });

            egui::CollapsingHeader::new("Visible listings")
                .default_open(false)
                .show(ui, |ui: &mut Ui| listing_table(ui, store, views));
        });
}

/// Draw a chart, or its error message when the stage failed.
fn with_chart<T>(ui: &mut Ui, data: &PipelineResult<T>, draw: impl FnOnce(&mut Ui, &T)) {
    match data {
        Ok(data) => draw(ui, data),
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Chart unavailable: {e}"));
        }
    }
    ui.add_space(12.0);
}

/// Which axis carries category names instead of numbers.
enum CategoryAxis {
    X(Vec<String>),
    Y(Vec<String>),
}

fn show_bars(ui: &mut Ui, id: &str, labels: [&str; 2], chart: BarChart, categories: Option<CategoryAxis>) {
    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(labels[0])
        .y_axis_label(labels[1])
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_boxed_zoom(true);
    plot = match categories {
        Some(CategoryAxis::X(names)) => plot.x_axis_formatter(category_formatter(names)),
        Some(CategoryAxis::Y(names)) => plot.y_axis_formatter(category_formatter(names)),
        None => plot,
    };
    plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn rent_histogram(ui: &mut Ui, hist: &RentHistogram) {
    let bars = hist
        .bins
        .iter()
        .zip(&hist.colors)
        .map(|(bin, color)| {
            Bar::new(bin.midpoint(), bin.count as f64)
                .width(bin.width() * 0.9)
                .fill(*color)
                .stroke(Stroke::new(1.5, Color32::BLACK))
                .name(format!("{:.0} – {:.0}", bin.lower, bin.upper))
        })
        .collect();
    show_bars(ui, "rent_histogram", ["Rent (R$)", "Frequency"], BarChart::new(bars), None);
}

/// Bars positioned at 0, 1, 2…; the category axis shows city names.
fn city_chart(ui: &mut Ui, id: &str, bars: &[CityBar], value_label: &str, horizontal: bool) {
    let labels: Vec<String> = bars.iter().map(|b| b.city.clone()).collect();
    let plot_bars = bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.value)
                .width(0.7)
                .fill(b.color)
                .name(&b.city)
        })
        .collect();

    let chart = BarChart::new(plot_bars);
    if horizontal {
        let axis = Some(CategoryAxis::Y(labels));
        show_bars(ui, id, [value_label, "City"], chart.horizontal(), axis);
    } else {
        let axis = Some(CategoryAxis::X(labels));
        show_bars(ui, id, ["City", value_label], chart, axis);
    }
}

fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn listing_table(ui: &mut Ui, store: &ListingStore, views: &DashboardViews) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(true)
        .max_scroll_height(300.0)
        .columns(Column::auto().at_least(80.0), 5)
        .header(20.0, |mut header| {
            for title in ["City", "Rooms", "Area (m²)", "Rent (R$)", "Animals"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, views.visible_indices.len(), |mut row| {
                let Some(listing) = store.get(views.visible_indices[row.index()]) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(listing.city.as_str());
                });
                row.col(|ui| {
                    ui.label(listing.rooms.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", listing.area));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", listing.rent_amount));
                });
                row.col(|ui| {
                    ui.label(listing.animals.to_string());
                });
            });
        });
}
