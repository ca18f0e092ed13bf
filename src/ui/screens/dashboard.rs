use {
    crate::{
        domain::{ChartKind, QueryParameters, ThemeMode},
        models::{DerivedStats, HistoryLog, PriceSeries},
        ui::{
            ControlsPanel, HistoryPanel, Panel, PriceChart, SettingsPanel, StatsPanel, UI_CONFIG,
            UI_TEXT, UiEvent, styles::UiStyleExt,
        },
    },
    eframe::egui::{Align, CentralPanel, Context, Layout, RichText, ScrollArea, TopBottomPanel},
};

/// Read-only snapshot of what the dashboard draws this frame.
pub(crate) struct DashboardView<'a> {
    pub user: &'a str,
    pub params: &'a QueryParameters,
    pub series: Option<&'a PriceSeries>,
    pub stats: Option<&'a DerivedStats>,
    pub stats_params: Option<&'a QueryParameters>,
    pub history: &'a HistoryLog,
    pub chart_kind: ChartKind,
    pub theme: ThemeMode,
    pub status: Option<(&'a str, bool)>,
}

pub(crate) fn render_dashboard(ctx: &Context, view: &DashboardView<'_>) -> Vec<UiEvent> {
    let mut events = Vec::new();

    TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading(RichText::new(&UI_TEXT.app_title).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.accent_button(&UI_TEXT.logout_button, UI_CONFIG.colors.logout) {
                    events.push(UiEvent::Logout);
                }
                if ui.button(UI_TEXT.theme_toggle(view.theme)).clicked() {
                    events.push(UiEvent::ToggleTheme);
                }
                ui.label(format!("{} {}", UI_TEXT.welcome_prefix, view.user));
            });
        });
    });

    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().show(ui, |ui| {
            UI_CONFIG.card_frame(ui).show(ui, |ui| {
                events.extend(ControlsPanel::new(view.params, view.chart_kind).render(ui));
            });
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                UI_CONFIG.card_frame(&cols[0]).show(&mut cols[0], |ui| {
                    events.extend(
                        StatsPanel::new(view.stats, view.stats_params, view.params).render(ui),
                    );
                });
                UI_CONFIG.card_frame(&cols[1]).show(&mut cols[1], |ui| {
                    events.extend(
                        SettingsPanel::new(view.user, view.params, view.chart_kind, view.theme)
                            .render(ui),
                    );
                });
            });
            ui.add_space(8.0);

            UI_CONFIG.card_frame(ui).show(ui, |ui| {
                let name = format!("{} ({})", view.params.asset_label(), view.params.currency_label());
                PriceChart::new(view.series, view.chart_kind, name).show(ui);
            });
            ui.add_space(8.0);

            UI_CONFIG.card_frame(ui).show(ui, |ui| {
                events.extend(HistoryPanel::new(view.history, view.status).render(ui));
            });
        });
    });

    events
}
