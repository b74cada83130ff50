//! Run Options

/// Options for the run use case
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Report the steps without connecting anywhere
    pub dry_run: bool,
    /// Hosts processed concurrently (1 = sequential)
    pub parallel: usize,
}

impl RunOptions {
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

impl Default for RunOptions {
    fn default() -> Self {
        Self::new()
    }
}
