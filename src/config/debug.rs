//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Each outgoing request and each completed response
    pub log_fetch: bool,

    /// Appends, evictions and history persistence
    pub log_history: bool,

    /// Login / logout fan-out
    pub log_identity: bool,

    /// Query parameter changes and their persistence
    pub log_params: bool,

    /// Results thrown away because the parameters moved on
    pub log_stale: bool,
}

pub const DF: LogFlags = LogFlags {
    log_fetch: true,
    log_stale: true,

    log_history: false,
    log_identity: false,
    log_params: false,
};
