//! Name-keyed register table.
//!
//! The table is built once from configuration and only read afterwards. Entries keep their
//! configured order for listing; lookups go through a name index.

use std::collections::HashMap;

use super::descriptor::RegisterDescriptor;
use crate::common::Error;
use crate::fixed::MAX_FRACTION_WIDTH;

/// Immutable set of register descriptors.
#[derive(Debug, Clone, Default)]
pub struct RegisterTable {
    entries: Vec<RegisterDescriptor>,
    index: HashMap<String, usize>,
}

impl RegisterTable {
    /// Builds a table from descriptors in configuration order.
    ///
    /// When two descriptors share a name, the later one is the one [`resolve`](Self::resolve)
    /// returns. Both stay in the listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty name or a fraction width of 32 or more.
    pub fn new(descriptors: Vec<RegisterDescriptor>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(descriptors.len());

        for (i, reg) in descriptors.iter().enumerate() {
            if reg.name.is_empty() {
                return Err(Error::invalid_config(format!(
                    "register #{i} has an empty name"
                )));
            }
            if reg.fraction_width > MAX_FRACTION_WIDTH {
                return Err(Error::invalid_config(format!(
                    "register \"{}\" has fraction width {}; at most {MAX_FRACTION_WIDTH} bits fit",
                    reg.name, reg.fraction_width
                )));
            }
            if let Some(prev) = index.insert(reg.name.clone(), i) {
                tracing::warn!(
                    "register \"{}\" is defined more than once (entries {} and {}); using the last",
                    reg.name,
                    prev,
                    i
                );
            }
        }

        Ok(Self {
            entries: descriptors,
            index,
        })
    }

    /// Looks up a register by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRegister`] carrying every configured name when there is no match.
    pub fn resolve(&self, name: &str) -> Result<&RegisterDescriptor, Error> {
        self.get(name).ok_or_else(|| Error::UnknownRegister {
            name: name.to_owned(),
            available: self.names().map(str::to_owned).collect(),
        })
    }

    /// Looks up a register by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisterDescriptor> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Register names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|reg| reg.name.as_str())
    }

    /// Descriptors in configuration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegisterDescriptor> {
        self.entries.iter()
    }

    /// Number of configured descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no registers are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegisterTable {
    type Item = &'a RegisterDescriptor;
    type IntoIter = std::slice::Iter<'a, RegisterDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
