//! Service options

/// Options for [`ViewService`](crate::ViewService)
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    /// Apply retypes that pass with a warning (default: false, such retypes are
    /// reported but not written)
    pub accept_warnings: bool,
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether warned retypes are applied
    pub fn with_accept_warnings(mut self, accept: bool) -> Self {
        self.accept_warnings = accept;
        self
    }
}
