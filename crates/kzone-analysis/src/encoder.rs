//! Categorical encoders
//!
//! A [`CategoryEncoder`] assigns dense integer codes to the distinct values of
//! a categorical column. Classes are sorted, so the code of a class depends
//! only on the set of values seen, not on their order.
//!
//! ```
//! use kzone_analysis::encoder::CategoryEncoder;
//!
//! let encoder = CategoryEncoder::fit(["SL", "FF", "SL", "CH"]);
//! assert_eq!(encoder.classes(), ["CH", "FF", "SL"]);
//! assert_eq!(encoder.encode("SL"), Some(2));
//! assert_eq!(encoder.decode(1), Some("FF"));
//! assert_eq!(encoder.encode("KN"), None);
//! ```

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryEncoder {
    classes: Vec<String>,
}

impl CategoryEncoder {
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes = values
            .into_iter()
            .map(|value| value.as_ref().to_owned())
            .collect::<BTreeSet<_>>();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Distinct values in code order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn encode(&self, value: &str) -> Option<u32> {
        let index = self
            .classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()?;
        u32::try_from(index).ok()
    }

    #[must_use]
    pub fn decode(&self, code: u32) -> Option<&str> {
        let index = usize::try_from(code).ok()?;
        self.classes.get(index).map(String::as_str)
    }

    /// Class → code for every class.
    #[must_use]
    pub fn codes(&self) -> BTreeMap<String, u32> {
        self.classes
            .iter()
            .zip(0..)
            .map(|(class, code)| (class.clone(), code))
            .collect()
    }
}
