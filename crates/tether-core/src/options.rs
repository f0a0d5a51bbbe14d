///
/// ReconcileOptions
///
/// Session-scoped policy for a relation set. Debug is propagated into every
/// reconciliation phase; phases do not expose independent debug control.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReconcileOptions {
    /// Gate `save_all` behind a full `validate_all` pass.
    pub validate_before_save: bool,

    /// Emit `[debug]` lines around reconciliation phases.
    pub debug: bool,
}

impl ReconcileOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validate_before_save: true,
            debug: false,
        }
    }

    #[must_use]
    pub const fn with_validation(mut self, validate_before_save: bool) -> Self {
        self.validate_before_save = validate_before_save;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self::new()
    }
}
