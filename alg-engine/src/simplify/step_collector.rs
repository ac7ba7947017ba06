//! Collection of the [`Step`]s applied while simplifying.

use super::step::Step;
use log::trace;

/// Receives the [`Step`]s applied by the simplifier, in the order they are applied.
///
/// Pass `&mut ()` to discard the steps, or a `Vec<Step>` to keep them.
pub trait StepCollector {
    /// Records an applied step.
    fn push(&mut self, step: Step);
}

impl StepCollector for () {
    #[inline]
    fn push(&mut self, _: Step) {}
}

impl StepCollector for Vec<Step> {
    #[inline]
    fn push(&mut self, step: Step) {
        Vec::push(self, step);
    }
}

/// Logs each step before handing it to another collector.
pub(crate) struct Traced<'a>(pub(crate) &'a mut dyn StepCollector);

impl StepCollector for Traced<'_> {
    fn push(&mut self, step: Step) {
        trace!("applied step: {}", step);
        self.0.push(step);
    }
}
