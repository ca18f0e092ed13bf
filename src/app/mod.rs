mod root;
mod state;

pub(crate) use state::{Screen, StatusLine};

pub use root::App;
