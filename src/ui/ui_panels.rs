use {
    crate::{
        config::constants::query::{ASSET_CHOICES, CURRENCY_CHOICES, WINDOW_CHOICES},
        domain::{ChartKind, QueryParameters, QueryUpdate, ThemeMode},
        models::{DerivedStats, HistoryLog},
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::{UiStyleExt, format_price, neutral_text_color, section_heading},
        },
    },
    eframe::egui::{Align, ComboBox, Grid, Layout, RichText, Ui},
    egui_extras::{Column, TableBuilder},
    strum::IntoEnumIterator,
};

/// Everything a panel can ask the app to do. Panels never touch the engine directly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UiEvent {
    Login(String),
    Logout,
    ToggleTheme,
    SetParams(QueryUpdate),
    SetChartKind(ChartKind),
    ExportCsv,
}

pub(crate) trait Panel {
    fn render(&mut self, ui: &mut Ui) -> Vec<UiEvent>;
}

/// Asset / window / currency / chart-kind selectors.
pub(crate) struct ControlsPanel<'a> {
    params: &'a QueryParameters,
    chart_kind: ChartKind,
}

impl<'a> ControlsPanel<'a> {
    pub(crate) fn new(params: &'a QueryParameters, chart_kind: ChartKind) -> Self {
        Self { params, chart_kind }
    }
}

impl Panel for ControlsPanel<'_> {
    fn render(&mut self, ui: &mut Ui) -> Vec<UiEvent> {
        let mut events = Vec::new();
        ui.horizontal_wrapped(|ui| {
            ui.label(&UI_TEXT.label_asset);
            let mut asset = self.params.asset.clone();
            ComboBox::from_id_salt("asset")
                .selected_text(self.params.asset_label())
                .show_ui(ui, |ui| {
                    for &(id, label) in ASSET_CHOICES {
                        if ui
                            .selectable_value(&mut asset, id.to_string(), label)
                            .clicked()
                        {
                            events.push(UiEvent::SetParams(QueryUpdate::asset(asset.clone())));
                        }
                    }
                });

            ui.add_space(12.0);
            ui.label(&UI_TEXT.label_window);
            let mut days = self.params.window_days;
            ComboBox::from_id_salt("window_days")
                .selected_text(UI_TEXT.window_label(days))
                .show_ui(ui, |ui| {
                    for &choice in WINDOW_CHOICES {
                        if ui
                            .selectable_value(&mut days, choice, UI_TEXT.window_label(choice))
                            .clicked()
                        {
                            events.push(UiEvent::SetParams(QueryUpdate::window_days(days)));
                        }
                    }
                });

            ui.add_space(12.0);
            ui.label(&UI_TEXT.label_currency);
            let mut currency = self.params.currency.clone();
            ComboBox::from_id_salt("currency")
                .selected_text(self.params.currency_label())
                .show_ui(ui, |ui| {
                    for &choice in CURRENCY_CHOICES {
                        if ui
                            .selectable_value(
                                &mut currency,
                                choice.to_string(),
                                choice.to_uppercase(),
                            )
                            .clicked()
                        {
                            events.push(UiEvent::SetParams(QueryUpdate::currency(
                                currency.clone(),
                            )));
                        }
                    }
                });

            ui.add_space(12.0);
            ui.label(&UI_TEXT.label_chart);
            ComboBox::from_id_salt("chart_kind")
                .selected_text(self.chart_kind.to_string())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::iter() {
                        if ui
                            .selectable_value(&mut self.chart_kind, kind, kind.to_string())
                            .clicked()
                        {
                            events.push(UiEvent::SetChartKind(kind));
                        }
                    }
                });
        });
        events
    }
}

/// Current price, signed change, percent and extrema.
pub(crate) struct StatsPanel<'a> {
    stats: Option<&'a DerivedStats>,
    /// Parameters the stats belong to (may lag the selection while fetching).
    stats_params: Option<&'a QueryParameters>,
    current_params: &'a QueryParameters,
}

impl<'a> StatsPanel<'a> {
    pub(crate) fn new(
        stats: Option<&'a DerivedStats>,
        stats_params: Option<&'a QueryParameters>,
        current_params: &'a QueryParameters,
    ) -> Self {
        Self {
            stats,
            stats_params,
            current_params,
        }
    }
}

impl Panel for StatsPanel<'_> {
    fn render(&mut self, ui: &mut Ui) -> Vec<UiEvent> {
        let (Some(stats), Some(params)) = (self.stats, self.stats_params) else {
            section_heading(ui, &UI_TEXT.stats_heading);
            ui.label_subdued(&UI_TEXT.chart_loading);
            return Vec::new();
        };

        ui.horizontal(|ui| {
            section_heading(ui, format!("{} {}", UI_TEXT.stats_heading, params.asset_label()));
            if params != self.current_params {
                ui.label_subdued(&UI_TEXT.stats_stale);
            }
        });

        let cur = params.currency_label();
        let change_color = UI_CONFIG.change_color(stats.absolute_change);
        let arrow = if stats.is_up() {
            &UI_TEXT.arrow_up
        } else {
            &UI_TEXT.arrow_down
        };
        let neutral = neutral_text_color(ui);

        Grid::new("stats_grid").num_columns(2).show(ui, |ui| {
            ui.metric(&UI_TEXT.stats_current, &format_price(stats.current, &cur), neutral);
            ui.end_row();
            ui.metric(
                &UI_TEXT.stats_change,
                &format!("{} {:+} {}", arrow, stats.absolute_change, cur),
                change_color,
            );
            ui.end_row();
            ui.metric(
                &UI_TEXT.stats_percent,
                &format!("{}%", stats.percent_text()),
                change_color,
            );
            ui.end_row();
            ui.metric(&UI_TEXT.stats_min, &format_price(stats.min, &cur), neutral);
            ui.end_row();
            ui.metric(&UI_TEXT.stats_max, &format_price(stats.max, &cur), neutral);
            ui.end_row();
        });
        Vec::new()
    }
}

/// Summary of the active configuration plus the theme switch.
pub(crate) struct SettingsPanel<'a> {
    user: &'a str,
    params: &'a QueryParameters,
    chart_kind: ChartKind,
    theme: ThemeMode,
}

impl<'a> SettingsPanel<'a> {
    pub(crate) fn new(
        user: &'a str,
        params: &'a QueryParameters,
        chart_kind: ChartKind,
        theme: ThemeMode,
    ) -> Self {
        Self {
            user,
            params,
            chart_kind,
            theme,
        }
    }
}

impl Panel for SettingsPanel<'_> {
    fn render(&mut self, ui: &mut Ui) -> Vec<UiEvent> {
        let mut events = Vec::new();
        section_heading(ui, &UI_TEXT.settings_heading);
        ui.label_subdued(&UI_TEXT.settings_subtitle);
        ui.add_space(6.0);

        Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
            ui.label(&UI_TEXT.welcome_prefix);
            ui.label(RichText::new(self.user).strong());
            ui.end_row();
            ui.label(&UI_TEXT.label_asset);
            ui.label(self.params.asset_label());
            ui.end_row();
            ui.label(&UI_TEXT.label_window);
            ui.label(UI_TEXT.window_label(self.params.window_days));
            ui.end_row();
            ui.label(&UI_TEXT.label_currency);
            ui.label(self.params.currency_label());
            ui.end_row();
            ui.label(&UI_TEXT.label_chart);
            ui.label(self.chart_kind.to_string());
            ui.end_row();
            ui.label(&UI_TEXT.settings_theme);
            if ui.button(UI_TEXT.theme_toggle(self.theme)).clicked() {
                events.push(UiEvent::ToggleTheme);
            }
            ui.end_row();
        });
        events
    }
}

/// Newest-first history table with the CSV export action.
pub(crate) struct HistoryPanel<'a> {
    history: &'a HistoryLog,
    status: Option<(&'a str, bool)>,
}

impl<'a> HistoryPanel<'a> {
    pub(crate) fn new(history: &'a HistoryLog, status: Option<(&'a str, bool)>) -> Self {
        Self { history, status }
    }
}

impl Panel for HistoryPanel<'_> {
    fn render(&mut self, ui: &mut Ui) -> Vec<UiEvent> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            section_heading(ui, &UI_TEXT.history_heading);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.accent_button(&UI_TEXT.export_button, UI_CONFIG.colors.export) {
                    events.push(UiEvent::ExportCsv);
                }
                if let Some((text, is_error)) = self.status {
                    let color = if is_error {
                        UI_CONFIG.colors.price_down
                    } else {
                        UI_CONFIG.colors.price_up
                    };
                    ui.label(RichText::new(text).small().color(color));
                }
            });
        });

        if self.history.is_empty() {
            ui.label_subdued(&UI_TEXT.history_empty);
            return events;
        }

        let records = self.history.records();
        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(40.0), UI_TEXT.history_columns.len())
            .max_scroll_height(UI_CONFIG.history_max_height)
            .header(UI_CONFIG.history_row_height, |mut header| {
                for title in UI_TEXT.history_columns {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(UI_CONFIG.history_row_height, records.len(), |mut row| {
                    let record = &records[row.index()];
                    let change_color = UI_CONFIG.change_color(record.absolute_change);
                    for (col, field) in record.csv_fields().into_iter().enumerate() {
                        row.col(|ui| {
                            // Change and percent columns are coloured by direction.
                            if col == 5 || col == 6 {
                                ui.label(RichText::new(field).color(change_color));
                            } else {
                                ui.label(field);
                            }
                        });
                    }
                });
            });
        events
    }
}
