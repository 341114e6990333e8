use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::AnimalFilter;
use crate::state::AppState;

const ALL_CITIES: &str = "All cities";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let store = match &state.store {
        Some(store) => store,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Copy what we need so we can mutate the criteria below.
    let cities = store.cities().to_vec();
    let (room_lo, room_hi) = store.room_bounds().unwrap_or((0, 0));
    let (rent_lo, rent_hi) = store.rent_bounds().unwrap_or((0.0, 0.0));
    let (rent_lo, rent_hi) = (rent_lo.floor(), rent_hi.ceil());

    let mut changed = false;
    let mut reset = false;
    let criteria = &mut state.criteria;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- City ----
            ui.strong("City");
            let selected = criteria.city.clone().unwrap_or_else(|| ALL_CITIES.to_string());
            egui::ComboBox::from_id_salt("city")
                .selected_text(&selected)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(criteria.city.is_none(), ALL_CITIES)
                        .clicked()
                    {
                        criteria.city = None;
                        changed = true;
                    }
                    for city in &cities {
                        let is_current = criteria.city.as_deref() == Some(city.as_str());
                        if ui.selectable_label(is_current, city).clicked() {
                            criteria.city = Some(city.clone());
                            changed = true;
                        }
                    }
                });
            ui.separator();

            // ---- Rooms ----
            ui.strong("Rooms");
            let rooms = &mut criteria.rooms;
            if ui
                .add(egui::Slider::new(&mut rooms.min, room_lo..=room_hi).text("min"))
                .changed()
            {
                rooms.max = rooms.max.max(rooms.min);
                changed = true;
            }
            if ui
                .add(egui::Slider::new(&mut rooms.max, room_lo..=room_hi).text("max"))
                .changed()
            {
                rooms.min = rooms.min.min(rooms.max);
                changed = true;
            }
            ui.separator();

            // ---- Rent ----
            ui.strong("Rent (R$)");
            let rent = &mut criteria.rent;
            if ui
                .add(
                    egui::Slider::new(&mut rent.min, rent_lo..=rent_hi)
                        .step_by(1.0)
                        .text("min"),
                )
                .changed()
            {
                rent.max = rent.max.max(rent.min);
                changed = true;
            }
            if ui
                .add(
                    egui::Slider::new(&mut rent.max, rent_lo..=rent_hi)
                        .step_by(1.0)
                        .text("max"),
                )
                .changed()
            {
                rent.min = rent.min.min(rent.max);
                changed = true;
            }
            ui.separator();

            // ---- Animals ----
            ui.strong("Accepts animals?");
            egui::ComboBox::from_id_salt("animals")
                .selected_text(criteria.animals.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in AnimalFilter::ALL {
                        if ui
                            .selectable_value(&mut criteria.animals, option, option.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
            ui.separator();

            if ui.button("Reset filters").clicked() {
                reset = true;
            }
        });

    if reset {
        state.reset_filters();
    } else if changed {
        state.refresh();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} listings loaded, {} visible",
                store.len(),
                state.visible_count()
            ));
        }

        ui.separator();

        if state.loading {
            ui.spinner();
        }
        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rental listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
