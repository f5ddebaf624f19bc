/// Search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The search gives up with `Unsolved` after expanding this many states.
    pub max_expansions: usize,
    /// The progress callback is invoked every this many expansions, 0 disables it.
    pub progress_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_expansions: 1_000_000,
            progress_interval: 5_000,
        }
    }
}
