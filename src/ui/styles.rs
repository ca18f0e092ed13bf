use eframe::egui::{Button, Color32, RichText, Ui};

pub(crate) fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text.into()).heading().strong());
    ui.add_space(4.0);
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn accent_button(&mut self, text: impl Into<String>, fill: Color32) -> bool;
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.label(format!("{}:", label));
            ui.label(RichText::new(value).strong().color(color));
        });
    }

    /// Filled button with white text. Returns `true` on click.
    fn accent_button(&mut self, text: impl Into<String>, fill: Color32) -> bool {
        self.add(Button::new(RichText::new(text).color(Color32::WHITE)).fill(fill))
            .clicked()
    }
}

/// Prices print like the history table: integers without a fraction.
pub(crate) fn format_price(value: f64, currency_label: &str) -> String {
    format!("{} {}", value, currency_label)
}

pub(crate) fn neutral_text_color(ui: &Ui) -> Color32 {
    ui.visuals().text_color()
}
