mod chart_kind;
mod query;
mod theme;

pub use chart_kind::ChartKind;
pub use query::{QueryParameters, QueryUpdate, asset_label};
pub use theme::ThemeMode;
