//! Ready-made collection kinds.

use gated_foundation::Result;

use crate::collection::Collection;
use crate::policy::{BoolGate, DateTimeGate, FloatGate, IntGate, OpenObjectGate, StringGate};

/// Integers only.
pub type IntCollection = Collection<IntGate>;
/// Floats only.
pub type FloatCollection = Collection<FloatGate>;
/// Strings only.
pub type StringCollection = Collection<StringGate>;
/// Booleans only.
pub type BoolCollection = Collection<BoolGate>;
/// Date-times only.
pub type DateTimeCollection = Collection<DateTimeGate>;
/// Objects of any type.
pub type ObjectCollection = Collection<OpenObjectGate>;

impl Collection<DateTimeGate> {
    /// Converts every date-time to its Unix timestamp in seconds.
    ///
    /// # Errors
    ///
    /// Does not fail for a well-formed collection; the signature follows
    /// [`map_to`](Collection::map_to).
    pub fn to_timestamps(&self) -> Result<IntCollection> {
        self.map_to(|value, _| value.as_datetime().map(|dt| dt.timestamp()))
    }

    /// Converts every date-time to milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// See [`to_timestamps`](Self::to_timestamps).
    pub fn to_unix_millis(&self) -> Result<IntCollection> {
        self.map_to(|value, _| value.as_datetime().map(|dt| dt.timestamp_millis()))
    }
}
