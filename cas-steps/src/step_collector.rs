/// A type that collects the steps taken while stepping through an expression.
///
/// [`StepCollector`] is also implemented for the unit type `()`, for callers that only want the
/// final result and not the steps that led to it.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
