//! Inference configuration.

/// Knobs for one inference run.
///
/// ```ignore
/// let options = InferOptions::default()
///     .with_max_inline_depth(16)
///     .with_dump_environment(true);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InferOptions {
    /// Re-entering a function that is already being elaborated yields a
    /// fresh unconstrained variable instead of recursing.
    pub recursion_guard: bool,
    /// Maximum number of nested call-site specializations.
    pub max_inline_depth: usize,
    /// Log every finished environment at `debug` level.
    pub dump_environment: bool,
}

impl InferOptions {
    /// Default nesting limit for call-site specialization.
    pub const DEFAULT_MAX_INLINE_DEPTH: usize = 64;

    #[must_use]
    pub fn with_recursion_guard(mut self, enabled: bool) -> Self {
        self.recursion_guard = enabled;
        self
    }

    #[must_use]
    pub fn with_max_inline_depth(mut self, depth: usize) -> Self {
        self.max_inline_depth = depth;
        self
    }

    #[must_use]
    pub fn with_dump_environment(mut self, enabled: bool) -> Self {
        self.dump_environment = enabled;
        self
    }
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            recursion_guard: true,
            max_inline_depth: Self::DEFAULT_MAX_INLINE_DEPTH,
            dump_environment: false,
        }
    }
}

#[cfg(test)]
mod tests;
