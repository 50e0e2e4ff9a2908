//! JSON codec options

/// Options for reading sheets
#[derive(Debug, Clone, Default)]
pub struct SheetReadOptions {
    /// Fail instead of skipping entries that cannot be placed (default: false)
    pub strict: bool,
}

impl SheetReadOptions {
    /// Strict reading
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Options for writing sheets
#[derive(Debug, Clone, Default)]
pub struct SheetWriteOptions {
    /// Indent the output (default: compact)
    pub pretty: bool,
}

impl SheetWriteOptions {
    /// Indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}
