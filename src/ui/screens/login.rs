use {
    crate::{
        domain::ThemeMode,
        ui::{UI_CONFIG, UI_TEXT, UiEvent, styles::UiStyleExt},
    },
    eframe::egui::{CentralPanel, Context, Key, RichText, TextEdit},
};

/// Name prompt shown while nobody is logged in. Enter or the button submits.
pub(crate) fn render_login(ctx: &Context, name_input: &mut String, theme: ThemeMode) -> Vec<UiEvent> {
    let mut events = Vec::new();
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            UI_CONFIG.card_frame(ui).show(ui, |ui| {
                ui.set_width(UI_CONFIG.login_width);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(&UI_TEXT.app_title).size(24.0).strong());
                    ui.add_space(8.0);
                    ui.label(&UI_TEXT.login_heading);
                    ui.add_space(12.0);

                    let response = ui.add(
                        TextEdit::singleline(name_input)
                            .hint_text(&UI_TEXT.login_hint)
                            .desired_width(UI_CONFIG.login_width - 40.0),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                    ui.add_space(12.0);
                    let clicked = ui.accent_button(&UI_TEXT.login_button, UI_CONFIG.colors.accent);
                    if (submitted || clicked) && !name_input.trim().is_empty() {
                        events.push(UiEvent::Login(name_input.clone()));
                    }

                    ui.add_space(16.0);
                    if ui.button(UI_TEXT.theme_toggle(theme)).clicked() {
                        events.push(UiEvent::ToggleTheme);
                    }
                });
            });
        });
    });
    events
}
