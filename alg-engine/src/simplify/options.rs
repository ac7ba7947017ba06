/// Strategy flags for the [`Simplifier`](super::Simplifier).
///
/// Use [`SimplifyOptionsBuilder`] to change individual options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Combine a sum of fractions into a single fraction over a common denominator, so that
    /// `a/b + c/d` becomes `(a*d + c*b)/(b*d)`. Fractions with equal denominators have their
    /// numerators added directly.
    ///
    /// The default value is `false`.
    pub merge_fractions: bool,

    /// Fold known identities, such as `tan(x)*cot(x) = 1`, `exp(ln(x)) = x`, and
    /// `sin(x)^2 + cos(x)^2 = 1`.
    ///
    /// The default value is `true`.
    pub fold_identities: bool,

    /// Replace calls whose arguments are all values with their exact result, if the function's
    /// fast path produces one. For example, `sin(pi/6)` becomes `1/2`.
    ///
    /// The default value is `true`.
    pub fast_paths: bool,

    /// The maximum number of passes over the tree. Simplification stops early once a pass leaves
    /// the tree unchanged.
    ///
    /// The default value is `32`.
    pub max_passes: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            merge_fractions: false,
            fold_identities: true,
            fast_paths: true,
            max_passes: 32,
        }
    }
}

impl SimplifyOptions {
    /// Wraps the given [`SimplifyOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder(self)
    }
}

/// Helper struct to build a [`SimplifyOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptionsBuilder(SimplifyOptions);

impl SimplifyOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether sums of fractions are merged. See [`SimplifyOptions::merge_fractions`].
    pub fn merge_fractions(mut self, merge_fractions: bool) -> Self {
        self.0.merge_fractions = merge_fractions;
        self
    }

    /// Sets whether identities are folded. See [`SimplifyOptions::fold_identities`].
    pub fn fold_identities(mut self, fold_identities: bool) -> Self {
        self.0.fold_identities = fold_identities;
        self
    }

    /// Sets whether fast paths are used. See [`SimplifyOptions::fast_paths`].
    pub fn fast_paths(mut self, fast_paths: bool) -> Self {
        self.0.fast_paths = fast_paths;
        self
    }

    /// Sets the maximum number of passes. See [`SimplifyOptions::max_passes`].
    pub fn max_passes(mut self, max_passes: usize) -> Self {
        self.0.max_passes = max_passes;
        self
    }

    /// Builds the [`SimplifyOptions`] struct.
    pub fn build(self) -> SimplifyOptions {
        self.0
    }
}
