mod screens;
mod styles;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_text;

pub(crate) use screens::{DashboardView, render_dashboard, render_login};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::{
    ControlsPanel, HistoryPanel, Panel, SettingsPanel, StatsPanel, UiEvent,
};
pub(crate) use ui_plot_view::PriceChart;
