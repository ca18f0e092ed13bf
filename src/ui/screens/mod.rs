mod dashboard;
mod login;

pub(crate) use dashboard::{DashboardView, render_dashboard};
pub(crate) use login::render_login;
