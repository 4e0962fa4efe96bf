use eframe::egui::{Align, Button, Layout, RichText, Slider, Ui};

use super::super::ViewModel;
use super::super::engine::LayoutMode;

impl ViewModel {
    pub(in crate::app) fn draw_toolbar(
        &mut self,
        ui: &mut Ui,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Wellbeing avatars").strong());
            ui.separator();

            if let Some(engine) = &mut self.engine {
                let current = engine.mode();
                for mode in LayoutMode::ALL {
                    if ui.selectable_label(current == mode, mode.label()).clicked()
                        && current != mode
                    {
                        engine.set_mode(mode, &mut self.rng);
                    }
                }
                ui.separator();

                let mut spacing = engine.spacing_factor();
                let slider = ui.add_enabled(
                    engine.mode().is_sorted(),
                    Slider::new(&mut spacing, 0.5..=3.0).text("spacing"),
                );
                if slider.changed() {
                    let delta = spacing - engine.spacing_factor();
                    engine.adjust_spacing(delta, &mut self.rng);
                }
                ui.separator();
            }

            if ui.add_enabled(!is_reloading, Button::new("Reload")).clicked() {
                *reload_requested = true;
            }
            if is_reloading {
                ui.spinner();
            }

            let missing = self.schema.missing();
            if !missing.is_empty() {
                let list = missing
                    .iter()
                    .map(|kind| kind.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.separator();
                ui.label(RichText::new(format!("metrics unavailable: {list}")).weak());
            }

            if let Some(engine) = &self.engine {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} of {} respondents",
                            engine.particles().len(),
                            self.rows.len()
                        ))
                        .weak(),
                    );
                });
            }
        });
    }
}
