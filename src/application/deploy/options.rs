//! Deploy Options

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Report what would be pushed without connecting anywhere
    pub dry_run: bool,
    /// Hosts processed concurrently (1 = sequential)
    pub parallel: usize,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self {
            dry_run: false,
            parallel: 1,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self::new()
    }
}
