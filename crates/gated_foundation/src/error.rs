//! Error types for gated collections.
//!
//! Uses `thiserror` for the taxonomy. Compound operations wrap whatever went
//! wrong in an outer [`ErrorKind::Failure`] that names the operation, keeping
//! the specific reason as the error's source:
//!
//! ```text
//! failure in with_added("x") on Collection<int>[3 elements]
//!   because unacceptable element "x": expected int
//! ```

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::key::Key;
use crate::render::{self, Sample};
use crate::value::Value;

/// Boxed error returned by caller-supplied callbacks.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for collection operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The operation, receiver and arguments involved, if recorded.
    pub context: Option<ErrorContext>,
    /// The underlying reason, if any.
    #[source]
    cause: Option<BoxError>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            cause: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Chains an underlying cause.
    #[must_use]
    pub fn caused_by(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an unacceptable element error for a single value.
    #[must_use]
    pub fn unacceptable_element(value: &Value, expected: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnacceptableElement {
            value: render::value(value),
            expected: expected.to_string(),
        })
    }

    /// Creates an aggregated unacceptable element error for a batch.
    #[must_use]
    pub fn unacceptable_elements(invalid: usize, total: usize, sample: Sample) -> Self {
        Self::new(ErrorKind::UnacceptableElements {
            invalid,
            total,
            sample,
        })
    }

    /// Creates an unacceptable collection error.
    #[must_use]
    pub fn unacceptable_collection(
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnacceptableCollection {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a key not found error.
    #[must_use]
    pub fn key_not_found(key: Key) -> Self {
        Self::new(ErrorKind::KeyNotFound(key))
    }

    /// Creates an error for an append whose integer key is already taken.
    #[must_use]
    pub fn next_key_occupied(key: Key) -> Self {
        Self::new(ErrorKind::NextKeyOccupied(key))
    }

    /// Creates an element not found error.
    #[must_use]
    pub fn element_not_found(value: &Value) -> Self {
        Self::new(ErrorKind::ElementNotFound(render::value(value)))
    }

    /// Creates an invalid callback return value error.
    #[must_use]
    pub fn invalid_return(expected: &'static str, actual: &Value, call: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidClosureReturnValue {
            expected,
            actual: render::value(actual),
            call: call.into(),
        })
    }

    /// Wraps an error raised by a callback invoked for `key`/`value`.
    #[must_use]
    pub fn callback_failed(key: &Key, value: &Value, cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::CallbackFailed {
            key: key.clone(),
            value: render::value(value),
        })
        .caused_by(cause)
    }

    /// Creates a handled type missing error.
    #[must_use]
    pub fn handled_type_missing(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::HandledTypeMissing(name.into()))
    }

    /// Combines several violations detected together.
    ///
    /// A single violation is returned unwrapped.
    #[must_use]
    pub fn violations(mut kinds: Vec<ErrorKind>) -> Self {
        if kinds.len() == 1 {
            if let Some(kind) = kinds.pop() {
                return Self::new(kind);
            }
        }
        Self::new(ErrorKind::Violations(kinds))
    }

    /// Wraps `cause` as a failure inside `context`'s operation.
    #[must_use]
    pub fn failure(context: ErrorContext, cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Failure {
            operation: context.method.clone(),
        })
        .with_context(context)
        .caused_by(cause)
    }

    /// Returns the underlying cause when it is itself an [`Error`].
    #[must_use]
    pub fn inner(&self) -> Option<&Error> {
        self.cause.as_deref()?.downcast_ref::<Error>()
    }

    /// Returns the underlying cause, whatever its type.
    #[must_use]
    pub fn raw_cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Iterates over this error and every [`Error`] below it.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| e.inner())
    }

    /// Iterates over the kinds along the chain, outermost first.
    pub fn kinds(&self) -> impl Iterator<Item = &ErrorKind> {
        self.chain().map(|e| &e.kind)
    }

    /// Returns true if any error along the chain matches `predicate`.
    pub fn has_kind(&self, predicate: impl Fn(&ErrorKind) -> bool) -> bool {
        self.kinds().any(predicate)
    }

    /// Returns the innermost [`Error`] of the chain.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    /// Composes the full "failure in X: because Y" narrative.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(err) = current {
            if !out.is_empty() {
                out.push_str(": because ");
            }
            match err.downcast_ref::<Error>() {
                Some(Error {
                    kind: ErrorKind::Failure { .. },
                    context: Some(context),
                    ..
                }) => {
                    out.push_str("failure in ");
                    out.push_str(&context.to_string());
                }
                _ => out.push_str(&err.to_string()),
            }
            current = err.source();
        }
        out
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A structural argument has the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value failed the active acceptance policy.
    #[error("unacceptable element {value}: expected {expected}")]
    UnacceptableElement {
        /// Rendering of the rejected value.
        value: String,
        /// Description of what the policy accepts.
        expected: String,
    },

    /// Some values of a batch failed the active acceptance policy.
    #[error("{invalid}/{total} elements invalid: {sample}")]
    UnacceptableElements {
        /// Number of rejected values.
        invalid: usize,
        /// Size of the batch.
        total: usize,
        /// Bounded sample of the rejected entries.
        sample: Sample,
    },

    /// A collection argument is incompatible with the receiver.
    #[error("unacceptable collection {actual}: expected {expected}")]
    UnacceptableCollection {
        /// Description of the receiver's policy.
        expected: String,
        /// Description of the argument collection.
        actual: String,
    },

    /// A required key is absent.
    #[error("key not found: {0:?}")]
    KeyNotFound(Key),

    /// An append found its next integer key already in use.
    #[error("cannot append: next key {0:?} is already occupied")]
    NextKeyOccupied(Key),

    /// A required element is absent.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A callback returned a value outside its contract.
    #[error("invalid callback return value {actual} in {call}: expected {expected}")]
    InvalidClosureReturnValue {
        /// The kind of value the contract requires.
        expected: &'static str,
        /// Rendering of the value actually returned.
        actual: String,
        /// Which call returned it.
        call: String,
    },

    /// A callback returned an error.
    #[error("callback failed for key {key:?} with value {value}")]
    CallbackFailed {
        /// Key passed to the failing call.
        key: Key,
        /// Rendering of the value passed to the failing call.
        value: String,
    },

    /// The named type a collection handles is not registered.
    #[error("handled type {0} does not exist")]
    HandledTypeMissing(String),

    /// Several violations detected by one check.
    #[error("{}", join_kinds(.0))]
    Violations(Vec<ErrorKind>),

    /// Generic wrapper: something failed inside an operation.
    #[error("failure in {operation}")]
    Failure {
        /// The operation that failed.
        operation: String,
    },
}

fn join_kinds(kinds: &[ErrorKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The receiver, method and arguments of a failed operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Summary of the receiver.
    pub receiver: String,
    /// Name of the operation.
    pub method: String,
    /// Rendered arguments.
    pub arguments: Vec<String>,
}

impl ErrorContext {
    /// Creates a context for `method`.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Sets the receiver summary.
    #[must_use]
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    /// Adds a rendered argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.method, self.arguments.join(", "))?;
        if !self.receiver.is_empty() {
            write!(f, " on {}", self.receiver)?;
        }
        Ok(())
    }
}
