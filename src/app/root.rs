use {
    anyhow::{Context as _, Result},
    eframe::{
        Frame,
        egui::{Context, Visuals},
    },
    std::{path::PathBuf, sync::Arc},
};

use crate::{
    Cli,
    app::{Screen, StatusLine},
    config::{CoinGeckoApiConfig, PERSISTENCE, REPAINT_WHILE_FETCHING},
    data::{CoinGeckoProvider, JsonFileStore},
    domain::{ChartKind, ThemeMode},
    engine::DashboardEngine,
    shared::SharedIdentity,
    ui::{DashboardView, UiEvent, render_dashboard, render_login},
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub struct App {
    pub(crate) engine: DashboardEngine,
    pub(crate) chart_kind: ChartKind,
    pub(crate) theme: ThemeMode,
    pub(crate) name_input: String,
    pub(crate) export_dir: PathBuf,
    pub(crate) status: Option<StatusLine>,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Result<Self> {
        let state_path = args
            .state_path
            .unwrap_or_else(|| PathBuf::from(PERSISTENCE.app.state_path));
        let store = JsonFileStore::open(state_path);

        let api = match &args.api_base {
            Some(base) => CoinGeckoApiConfig::with_base_url(base.as_str()),
            None => CoinGeckoApiConfig::default(),
        };
        let provider =
            CoinGeckoProvider::new(api).context("Failed to build market data client")?;

        let engine = DashboardEngine::new(
            Box::new(store),
            Arc::new(provider),
            SharedIdentity::new(),
        );

        // Stored preference wins; otherwise follow whatever the platform started us in.
        let theme = engine
            .theme()
            .unwrap_or_else(|| ThemeMode::from_dark_mode(cc.egui_ctx.style().visuals.dark_mode));

        Ok(Self {
            engine,
            chart_kind: ChartKind::default(),
            theme,
            name_input: String::new(),
            export_dir: args.export_dir,
            status: None,
        })
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Login(name) => {
                if self.engine.login(&name) {
                    self.name_input.clear();
                    self.status = None;
                }
            }
            UiEvent::Logout => {
                self.engine.logout();
                self.status = None;
            }
            UiEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.engine.set_theme(self.theme);
            }
            UiEvent::SetParams(update) => {
                #[cfg(debug_assertions)]
                if DF.log_params {
                    log::info!("PARAMS: {:?}", update);
                }
                if let Err(e) = self.engine.set_params(update) {
                    log::error!("Failed to apply query parameters: {:#}", e);
                }
            }
            UiEvent::SetChartKind(kind) => self.chart_kind = kind,
            UiEvent::ExportCsv => {
                self.status = Some(match self.engine.write_csv(&self.export_dir) {
                    Ok(path) => {
                        log::info!("Exported history to {}", path.display());
                        StatusLine::ok(path.display().to_string())
                    }
                    Err(e) => {
                        log::error!("CSV export failed: {:#}", e);
                        StatusLine::error(format!("{:#}", e))
                    }
                });
            }
        }
    }

    fn render(&mut self, ctx: &Context) -> Vec<UiEvent> {
        match Screen::for_identity(self.engine.is_active()) {
            Screen::Login => render_login(ctx, &mut self.name_input, self.theme),
            Screen::Dashboard => {
                let user = self.engine.current_user();
                let view = DashboardView {
                    user: &user,
                    params: self.engine.params(),
                    series: self.engine.series(),
                    stats: self.engine.stats(),
                    stats_params: self.engine.stats_params(),
                    history: self.engine.history(),
                    chart_kind: self.chart_kind,
                    theme: self.theme,
                    status: self.status.as_ref().map(|s| (s.text.as_str(), s.is_error)),
                };
                render_dashboard(ctx, &view)
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.engine.update();
        setup_custom_visuals(ctx, self.theme);

        for event in self.render(ctx) {
            self.handle_event(event);
        }

        if self.engine.is_fetching() {
            ctx.request_repaint_after(REPAINT_WHILE_FETCHING);
        }
    }
}

fn setup_custom_visuals(ctx: &Context, theme: ThemeMode) {
    let visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
