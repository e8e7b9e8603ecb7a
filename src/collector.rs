/// Something which tracks a collection of errors.
///
/// This generalizes methods like [`MultiError::propagate`] which allow errors to be handled by
/// merging them into a different collection of errors. Code which produces errors can be written
/// against any collector:
///
/// ```
/// # use multierror::{ErrorCollector, MultiError};
/// /// Parse every item, recording the ones which aren't integers.
/// fn parse_all(input: &[&str], errs: &mut impl ErrorCollector<String>) -> Vec<u32> {
///     input
///         .iter()
///         .filter_map(|item| errs.push_result(item.parse::<u32>().map_err(|_| format!("bad int {item}"))))
///         .collect()
/// }
///
/// let mut errors = MultiError::new();
/// assert_eq!(parse_all(&["1", "x", "3"], &mut errors), vec![1, 3]);
/// assert_eq!(errors.to_string(), "bad int x");
///
/// let mut plain: Vec<String> = vec![];
/// parse_all(&["y", "z"], &mut plain);
/// assert_eq!(plain.len(), 2);
/// ```
///
/// [`MultiError::propagate`]: crate::MultiError::propagate
pub trait ErrorCollector<E> {
    /// The type returned by [`propagate`].
    ///
    /// [`propagate`]: ErrorCollector::propagate
    type WrappedInner;

    /// Add a new error to the collection of errors.
    fn push_error(&mut self, error: E);

    /// Consumes this collector and pushes all of its errors into a different collector, in order.
    /// If the type is wrapping some kind of value, it may return it too.
    fn propagate(self, other: &mut impl ErrorCollector<E>) -> Self::WrappedInner;

    /// Records the error of a failed [`Result`], or returns the value of a successful one.
    ///
    /// ```
    /// # use multierror::ErrorCollector;
    /// let mut errs: Vec<&str> = vec![];
    /// assert_eq!(errs.push_result::<u32>(Ok(5)), Some(5));
    /// assert_eq!(errs.push_result::<u32>(Err("nope")), None);
    /// assert_eq!(errs, vec!["nope"]);
    /// ```
    fn push_result<T>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push_error(error);
                None
            }
        }
    }
}

impl<E> ErrorCollector<E> for Vec<E> {
    type WrappedInner = ();

    fn push_error(&mut self, error: E) {
        self.push(error);
    }

    fn propagate(self, other: &mut impl ErrorCollector<E>) {
        for error in self {
            other.push_error(error);
        }
    }
}
