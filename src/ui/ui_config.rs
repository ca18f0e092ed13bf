use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke, Ui};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub accent: Color32,
    pub price_up: Color32,
    pub price_down: Color32,
    pub logout: Color32,
    pub export: Color32,
    pub plot_line: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub login_width: f32,
    pub plot_height: f32,
    pub history_row_height: f32,
    pub history_max_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        accent: Color32::from_rgb(59, 130, 246),
        price_up: Color32::from_rgb(34, 197, 94),
        price_down: Color32::from_rgb(239, 68, 68),
        logout: Color32::from_rgb(239, 68, 68),
        export: Color32::from_rgb(22, 163, 74),
        plot_line: Color32::from_rgb(59, 130, 246),
    },
    login_width: 320.0,
    plot_height: 280.0,
    history_row_height: 20.0,
    history_max_height: 320.0,
};

impl UiConfig {
    /// Rounded card used for every dashboard section; follows the active light/dark visuals.
    pub fn card_frame(&self, ui: &Ui) -> Frame {
        Frame {
            fill: ui.visuals().faint_bg_color,
            stroke: Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            inner_margin: Margin::same(12),
            corner_radius: CornerRadius::same(6),
            ..Default::default()
        }
    }

    pub fn change_color(&self, value: f64) -> Color32 {
        if value >= 0.0 {
            self.colors.price_up
        } else {
            self.colors.price_down
        }
    }
}
