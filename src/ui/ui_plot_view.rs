use {
    crate::{
        domain::ChartKind,
        models::PriceSeries,
        ui::{UI_CONFIG, UI_TEXT, styles::UiStyleExt},
    },
    eframe::egui::Ui,
    egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints},
    std::ops::RangeInclusive,
};

/// Axis label for sample index `x`: "Day N" on integer marks, blank between them.
pub(crate) fn day_axis_label(x: f64) -> String {
    if x < 0.0 || x.fract() != 0.0 {
        return String::new();
    }
    UI_TEXT.day_label(x as usize)
}

pub(crate) struct PriceChart<'a> {
    series: Option<&'a PriceSeries>,
    kind: ChartKind,
    name: String,
}

impl<'a> PriceChart<'a> {
    pub(crate) fn new(series: Option<&'a PriceSeries>, kind: ChartKind, name: String) -> Self {
        Self { series, kind, name }
    }

    pub(crate) fn show(&self, ui: &mut Ui) {
        let Some(series) = self.series.filter(|s| !s.is_empty()) else {
            ui.add_space(UI_CONFIG.plot_height / 2.0);
            ui.vertical_centered(|ui| ui.label_subdued(&UI_TEXT.chart_loading));
            ui.add_space(UI_CONFIG.plot_height / 2.0);
            return;
        };

        let color = UI_CONFIG.colors.plot_line;
        let baseline = series.as_slice().iter().copied().fold(f64::INFINITY, f64::min);

        Plot::new("price_plot")
            .height(UI_CONFIG.plot_height)
            .allow_scroll(false)
            .allow_double_click_reset(true)
            .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                day_axis_label(mark.value)
            })
            .label_formatter(|name, point| {
                format!("{}\n{}: {}", name, day_axis_label(point.x.round()), point.y)
            })
            .show(ui, |plot_ui| match self.kind {
                ChartKind::Line => {
                    plot_ui.line(
                        Line::new(self.name.clone(), PlotPoints::from(series.indexed_points()))
                            .color(color)
                            .width(2.0)
                            .fill(baseline as f32),
                    );
                }
                ChartKind::Bar => {
                    let bars = series
                        .indexed_points()
                        .into_iter()
                        .map(|[x, y]| Bar::new(x, y).width(0.6))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(self.name.clone(), bars).color(color));
                }
            });
    }
}
