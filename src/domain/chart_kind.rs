use strum_macros::{Display, EnumIter};

/// How the price series is drawn. Session-only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}
