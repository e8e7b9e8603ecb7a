use std::{
    error::Error,
    fmt::{self, Debug, Display},
    slice, vec,
};

use tracing::trace;

use crate::ErrorCollector;

/// The default error type collected by a [`MultiError`], able to hold any error.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An ordered collection of errors which behaves like a single error.
///
/// `MultiError` is designed for multi-phase operations, where components can fail independently
/// and errors must be aggregated before handling. Errors are appended as they happen, and between
/// phases the collection is checked with [`err`] or [`into_result`], which treat an empty
/// `MultiError` exactly like "no error".
///
/// [`err`]: MultiError::err
/// [`into_result`]: MultiError::into_result
///
/// ```
/// # use multierror::MultiError;
/// let mut errors: MultiError<String> = MultiError::new();
///
/// // First phase
/// errors.append(None);
/// errors.append(None);
/// assert!(errors.err().is_none());
///
/// // Second phase
/// errors.append(Some("failed to d".to_owned()));
/// errors.append(Some("failed to e".to_owned()));
/// errors.append(None);
/// assert!(errors.err().is_some());
/// assert_eq!(errors.to_string(), "2 errors: failed to d; failed to e");
/// ```
///
/// # Rendering
///
/// The [`Display`] implementation depends on how many errors there are:
///
/// - No errors: the empty string.
/// - One error: that error's own message, unchanged.
/// - Otherwise: `"<N> errors: "` followed by each message, separated by `"; "`.
///
/// ```
/// # use multierror::MultiError;
/// assert_eq!(MultiError::<&str>::new().to_string(), "");
/// assert_eq!(MultiError::from(["a"]).to_string(), "a");
/// assert_eq!(MultiError::from(["a", "b", "c"]).to_string(), "3 errors: a; b; c");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct MultiError<E = BoxError> {
    errors: Vec<E>,
}

impl<E> MultiError<E> {
    /// Constructs a new `MultiError` with no errors.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let errors: MultiError = MultiError::new();
    /// assert!(errors.is_empty());
    /// assert!(errors.err().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        MultiError { errors: vec![] }
    }

    /// Constructs a new `MultiError` from existing errors, keeping their order.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let errors = MultiError::from_errors(vec!["a", "b"]);
    /// assert_eq!(errors.errors(), &["a", "b"]);
    /// ```
    #[must_use]
    pub fn from_errors(errors: impl IntoIterator<Item = E>) -> Self {
        MultiError { errors: errors.into_iter().collect() }
    }

    /// Appends an error, if there is one, and returns the state of the collection: `None` if it
    /// has no errors, or `Some(self)` if it does.
    ///
    /// Appending `None` changes nothing, but a `MultiError` which already contains errors is still
    /// returned as `Some`.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let mut errors = MultiError::new();
    /// assert!(errors.append(None).is_none());
    ///
    /// assert!(errors.append(Some("an error")).is_some());
    /// assert!(errors.append(None).is_some());
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn append(&mut self, error: Option<E>) -> Option<&Self> {
        if let Some(error) = error {
            self.push(error);
        }
        self.err()
    }

    /// Appends an error.
    pub fn push(&mut self, error: E) {
        self.errors.push(error);
        trace!(count = self.errors.len(), "error appended to MultiError");
    }

    /// Appends the error of a failed [`Result`], or returns the value of a successful one.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let mut errors = MultiError::new();
    /// let parsed: Vec<u32> = ["1", "two", "3"]
    ///     .into_iter()
    ///     .filter_map(|s| errors.append_result(s.parse::<u32>()))
    ///     .collect();
    ///
    /// assert_eq!(parsed, vec![1, 3]);
    /// assert_eq!(errors.to_string(), "invalid digit found in string");
    /// ```
    pub fn append_result<T>(&mut self, result: Result<T, E>) -> Option<T> {
        self.push_result(result)
    }

    /// Moves the errors from this `MultiError` into an [`ErrorCollector`], keeping their order.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let source = MultiError::from(["error 2", "error 3"]);
    /// let mut dest = MultiError::from(["error 1"]);
    ///
    /// source.propagate(&mut dest);
    /// assert_eq!(dest.errors(), &["error 1", "error 2", "error 3"]);
    /// ```
    pub fn propagate(self, other: &mut impl ErrorCollector<E>) {
        for error in self.errors {
            other.push_error(error);
        }
    }

    /// Returns `Some(self)` if there are any errors, or `None` if there are not.
    ///
    /// This is how the state of a `MultiError` is checked between phases of work.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let mut errors = MultiError::new();
    /// assert!(errors.err().is_none());
    ///
    /// errors.push("oops");
    /// if let Some(err) = errors.err() {
    ///     assert_eq!(err.to_string(), "oops");
    /// }
    /// ```
    #[must_use]
    pub fn err(&self) -> Option<&Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Converts this `MultiError` into a [`Result`] which is `Ok` if there are no errors, so that
    /// it can be used with `?`.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// fn validate(input: &[i32]) -> Result<(), MultiError<String>> {
    ///     let mut errors = MultiError::new();
    ///     for n in input {
    ///         if *n < 0 {
    ///             errors.push(format!("{n} is negative"));
    ///         }
    ///     }
    ///     errors.into_result()
    /// }
    ///
    /// assert!(validate(&[1, 2]).is_ok());
    /// assert_eq!(
    ///     validate(&[-1, 2, -3]).unwrap_err().to_string(),
    ///     "2 errors: -1 is negative; -3 is negative",
    /// );
    /// ```
    pub fn into_result(self) -> Result<(), Self> {
        self.into_result_with(())
    }

    /// Like [`into_result`], but produces `Ok(value)` if there are no errors.
    ///
    /// [`into_result`]: MultiError::into_result
    pub fn into_result_with<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Returns `true` if there are no errors.
    ///
    /// Opposite of [`has_errors`](#method.has_errors).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if there are any errors.
    ///
    /// Opposite of [`is_empty`](#method.is_empty).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    /// The number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The errors, in the order they were added.
    #[must_use]
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Iterates over the errors, in the order they were added.
    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.errors.iter()
    }

    /// Consumes this `MultiError` and returns its errors, so they can be processed one-by-one.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let errors = MultiError::from(["a", "b", "c"]);
    /// for err in errors.into_errors() {
    ///     println!("err: {err}");
    /// }
    /// ```
    #[must_use]
    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }
}

impl<E> Default for MultiError<E> {
    fn default() -> Self {
        MultiError::new()
    }
}

impl<E: Display> Display for MultiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [error] => write!(f, "{error}"),
            errors => {
                write!(f, "{} errors: ", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

impl<E: Display + Debug> Error for MultiError<E> {}

impl<E> ErrorCollector<E> for MultiError<E> {
    type WrappedInner = ();

    fn push_error(&mut self, error: E) {
        MultiError::push(self, error);
    }

    fn propagate(self, other: &mut impl ErrorCollector<E>) {
        MultiError::propagate(self, other)
    }
}

impl<E> From<Vec<E>> for MultiError<E> {
    fn from(errors: Vec<E>) -> Self {
        MultiError { errors }
    }
}

impl<E, const N: usize> From<[E; N]> for MultiError<E> {
    fn from(errors: [E; N]) -> Self {
        MultiError::from_errors(errors)
    }
}

impl<E> From<MultiError<E>> for Vec<E> {
    fn from(errors: MultiError<E>) -> Self {
        errors.into_errors()
    }
}

impl<E> AsRef<[E]> for MultiError<E> {
    fn as_ref(&self) -> &[E] {
        &self.errors
    }
}

impl<E> FromIterator<E> for MultiError<E> {
    /// Collects errors into a `MultiError`, in iteration order.
    ///
    /// ```
    /// # use multierror::MultiError;
    /// let errors: MultiError<String> = (1..=2).map(|i| format!("error {i}")).collect();
    /// assert_eq!(errors.to_string(), "2 errors: error 1; error 2");
    /// ```
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        MultiError::from_errors(iter)
    }
}

impl<E> Extend<E> for MultiError<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

impl<E> IntoIterator for MultiError<E> {
    type Item = E;
    type IntoIter = vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a MultiError<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("failed to {0}")]
    struct Oops(&'static str);

    fn oops(input: &'static str) -> Option<BoxError> {
        Some(Oops(input).into())
    }

    fn okay(_input: &'static str) -> Option<BoxError> {
        None
    }

    #[test]
    fn new_is_no_error() {
        let errors: MultiError = MultiError::new();
        assert!(errors.err().is_none());
        assert!(errors.into_result().is_ok());
        assert_eq!(MultiError::<BoxError>::default().to_string(), "");
    }

    #[test]
    fn phases() {
        let mut errors = MultiError::new();

        errors.append(okay("a"));
        errors.append(okay("b"));
        errors.append(okay("c"));
        assert!(errors.err().is_none());
        assert_eq!(errors.to_string(), "");

        errors.append(oops("d"));
        errors.append(oops("e"));
        assert!(errors.append(okay("f")).is_some());

        let err = errors.err().expect("second phase has errors");
        assert_eq!(err.to_string(), "2 errors: failed to d; failed to e");
    }

    #[test]
    fn single_error_renders_like_the_error() {
        let mut errors = MultiError::new();
        errors.append(oops("connect"));

        assert_eq!(errors.to_string(), Oops("connect").to_string());
    }

    #[test]
    fn append_returns_state() {
        let mut errors = MultiError::new();
        assert!(errors.append(None).is_none());
        assert!(errors.append(None).is_none());

        let state = errors.append(Some("an error")).expect("has an error");
        assert_eq!(state.len(), 1);
        assert_eq!(errors.to_string(), "an error");

        assert!(errors.append(Some("an error")).is_some());
        assert_eq!(errors.to_string(), "2 errors: an error; an error");
    }

    #[test]
    fn converts_from_and_to_vec() {
        let original = vec!["a", "b", "c"];
        let errors = MultiError::from(original.clone());
        assert!(errors.has_errors());
        assert_eq!(errors.to_string(), "3 errors: a; b; c");

        let back: Vec<&str> = errors.into();
        assert_eq!(back, original);
    }

    #[test]
    fn extend_and_iterate_keep_order() {
        let mut errors = MultiError::from(["first"]);
        errors.extend(["second", "third"]);

        let seen: Vec<&str> = (&errors).into_iter().copied().collect();
        assert_eq!(seen, vec!["first", "second", "third"]);
        assert_eq!(errors.as_ref().len(), 3);
    }

    #[test]
    fn into_result_with_value() {
        let errors: MultiError<String> = MultiError::new();
        assert_eq!(errors.into_result_with(42).ok(), Some(42));

        let errors = MultiError::from(["bad".to_owned()]);
        let err = errors.into_result_with(42).unwrap_err();
        assert_eq!(err.errors(), &["bad".to_owned()]);
    }

    #[test]
    fn propagate_into_vec() {
        let errors = MultiError::from(["x", "y"]);
        let mut dest = vec!["w"];

        ErrorCollector::propagate(errors, &mut dest);
        assert_eq!(dest, vec!["w", "x", "y"]);
    }

    #[test]
    fn works_with_question_mark() {
        fn run() -> anyhow::Result<()> {
            let mut errors = MultiError::new();
            errors.append(oops("read config"));
            errors.append(oops("open socket"));
            errors.into_result()?;
            Ok(())
        }

        let err = run().unwrap_err();
        assert_eq!(err.to_string(), "2 errors: failed to read config; failed to open socket");
        assert!(err.downcast_ref::<MultiError>().is_some());
    }

    #[test]
    fn boxes_as_std_error() {
        let errors = MultiError::from(["a", "b"]);
        let boxed: Box<dyn Error + Send + Sync> = Box::new(errors);

        assert_eq!(boxed.to_string(), "2 errors: a; b");
        assert!(boxed.source().is_none());
    }
}
