use std::sync::LazyLock;

use crate::domain::ThemeMode;

pub struct UiText {
    pub app_title: String,
    pub login_heading: String,
    pub login_hint: String,
    pub login_button: String,
    pub logout_button: String,
    pub welcome_prefix: String,
    pub theme_to_dark: String,
    pub theme_to_light: String,
    pub label_asset: String,
    pub label_window: String,
    pub label_currency: String,
    pub label_chart: String,
    pub stats_heading: String,
    pub stats_current: String,
    pub stats_change: String,
    pub stats_percent: String,
    pub stats_min: String,
    pub stats_max: String,
    pub stats_stale: String,
    pub chart_loading: String,
    pub settings_heading: String,
    pub settings_subtitle: String,
    pub settings_theme: String,
    pub history_heading: String,
    pub history_empty: String,
    pub export_button: String,
    pub history_columns: [&'static str; 9],
    pub arrow_up: String,
    pub arrow_down: String,
}

impl UiText {
    pub fn theme_toggle(&self, current: ThemeMode) -> &str {
        match current {
            ThemeMode::Light => &self.theme_to_dark,
            ThemeMode::Dark => &self.theme_to_light,
        }
    }

    pub fn window_label(&self, days: u32) -> String {
        format!("{} days", days)
    }

    pub fn day_label(&self, index: usize) -> String {
        format!("Day {}", index + 1)
    }
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "📊 Dashboard".to_string(),
    login_heading: "Sign in".to_string(),
    login_hint: "Enter your name".to_string(),
    login_button: "Sign in".to_string(),
    logout_button: "Sign out".to_string(),
    welcome_prefix: "Welcome,".to_string(),
    theme_to_dark: "🌙 Dark".to_string(),
    theme_to_light: "☀ Light".to_string(),
    label_asset: "Coin".to_string(),
    label_window: "Period".to_string(),
    label_currency: "Currency".to_string(),
    label_chart: "Chart".to_string(),
    stats_heading: "📈 Price".to_string(),
    stats_current: "Price now".to_string(),
    stats_change: "Change".to_string(),
    stats_percent: "Change %".to_string(),
    stats_min: "🔻 Min".to_string(),
    stats_max: "🔺 Max".to_string(),
    stats_stale: "(updating…)".to_string(),
    chart_loading: "Loading chart…".to_string(),
    settings_heading: "⚙ Settings".to_string(),
    settings_subtitle: "Panel configuration and actions.".to_string(),
    settings_theme: "Theme".to_string(),
    history_heading: "📄 History".to_string(),
    history_empty: "No queries yet.".to_string(),
    export_button: "⬇ Export CSV".to_string(),
    history_columns: ["⏱", "Coin", "Days", "Cur", "Now", "Δ", "%", "Min", "Max"],
    arrow_up: "⬆".to_string(),
    arrow_down: "⬇".to_string(),
});
