//! Human-readable rendering of values for diagnostics.
//!
//! Error messages never embed values directly; they go through [`value`] so
//! that output stays bounded by [`DiagnosticsConfig::max_rendered_len`].

use std::fmt;

use crate::config::DiagnosticsConfig;
use crate::key::Key;
use crate::value::Value;

const ELLIPSIS: &str = "...";

/// Renders a value for a diagnostic message.
///
/// Strings are quoted, objects show their class and fields, and anything
/// longer than the configured limit is cut with `...`.
#[must_use]
pub fn value(value: &Value) -> String {
    truncate(format!("{value:?}"), DiagnosticsConfig::current().max_rendered_len)
}

fn truncate(mut text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    let cut = text
        .char_indices()
        .nth(max.saturating_sub(ELLIPSIS.len()))
        .map_or(text.len(), |(i, _)| i);
    text.truncate(cut);
    text.push_str(ELLIPSIS);
    text
}

/// Bounded sample of keyed values, used when a batch is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    items: Vec<(Key, String)>,
    omitted: usize,
}

impl Sample {
    /// Collects up to `DiagnosticsConfig::sample_size` entries.
    #[must_use]
    pub fn collect<'a>(entries: impl IntoIterator<Item = (&'a Key, &'a Value)>) -> Self {
        Self::collect_bounded(entries, DiagnosticsConfig::current().sample_size)
    }

    /// Collects up to `limit` entries, counting the rest.
    #[must_use]
    pub fn collect_bounded<'a>(
        entries: impl IntoIterator<Item = (&'a Key, &'a Value)>,
        limit: usize,
    ) -> Self {
        let mut sample = Self::default();
        for (key, v) in entries {
            if sample.items.len() < limit {
                sample.items.push((key.clone(), value(v)));
            } else {
                sample.omitted += 1;
            }
        }
        sample
    }

    /// Returns the rendered entries.
    #[must_use]
    pub fn items(&self) -> &[(Key, String)] {
        &self.items
    }

    /// Returns the keys of the rendered entries.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.items.iter().map(|(key, _)| key)
    }

    /// Returns the number of entries left out.
    #[must_use]
    pub const fn omitted(&self) -> usize {
        self.omitted
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (key, rendered)) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?} => {rendered}")?;
        }
        if self.omitted > 0 && self.items.is_empty() {
            write!(f, "{} more", self.omitted)?;
        } else if self.omitted > 0 {
            write!(f, ", and {} more", self.omitted)?;
        }
        write!(f, "]")
    }
}
