//! Live sequences of a device handle.

use std::collections::BTreeMap;

use alp4_api::{DataFormat, SequenceId};
use alp4_errors::{AlpError, AlpResult};

/// What the handle knows about an allocated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceInfo {
    /// Bit planes per picture, 1..=8.
    pub bit_depth: u8,
    /// Pictures in the sequence.
    pub picture_count: u32,
    /// Layout of uploaded data.
    pub data_format: DataFormat,
}

/// Allocated sequences plus the most recent one.
///
/// Sequence-scoped calls that omit the id use the most recent allocation.
#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    live: BTreeMap<SequenceId, SequenceInfo>,
    last: Option<SequenceId>,
}

impl SequenceRegistry {
    /// Record a new allocation and make it the default.
    pub fn insert(&mut self, id: SequenceId, info: SequenceInfo) {
        self.live.insert(id, info);
        self.last = Some(id);
    }

    /// Forget a sequence. Clears the default when it pointed here.
    pub fn remove(&mut self, id: SequenceId) -> Option<SequenceInfo> {
        if self.last == Some(id) {
            self.last = None;
        }
        self.live.remove(&id)
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.live.clear();
        self.last = None;
    }

    /// Pick the explicit id or fall back to the most recent allocation.
    ///
    /// # Errors
    ///
    /// [`AlpError::UnknownSequence`] for ids that are not live,
    /// [`AlpError::NoSequence`] when nothing is allocated.
    pub fn resolve(&self, sequence: Option<SequenceId>) -> AlpResult<SequenceId> {
        match sequence {
            Some(id) if self.live.contains_key(&id) => Ok(id),
            Some(id) => Err(AlpError::UnknownSequence(id)),
            None => self.last.ok_or(AlpError::NoSequence),
        }
    }

    /// Info of a live sequence.
    pub fn get(&self, id: SequenceId) -> Option<&SequenceInfo> {
        self.live.get(&id)
    }

    /// Record a data format change.
    pub fn set_format(&mut self, id: SequenceId, format: DataFormat) {
        if let Some(info) = self.live.get_mut(&id) {
            info.data_format = format;
        }
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> Vec<SequenceId> {
        self.live.keys().copied().collect()
    }

    /// The most recent allocation, unless it was freed.
    pub fn last(&self) -> Option<SequenceId> {
        self.last
    }

    /// Number of live sequences.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True when nothing is allocated.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> SequenceInfo {
        SequenceInfo {
            bit_depth: 1,
            picture_count: 1,
            data_format: DataFormat::MsbAlign,
        }
    }

    #[test]
    fn test_resolution_order() {
        let mut registry = SequenceRegistry::default();
        assert!(matches!(registry.resolve(None), Err(AlpError::NoSequence)));

        registry.insert(SequenceId(1), info());
        registry.insert(SequenceId(2), info());
        assert_eq!(registry.resolve(None).ok(), Some(SequenceId(2)));
        assert_eq!(registry.resolve(Some(SequenceId(1))).ok(), Some(SequenceId(1)));
        assert!(matches!(
            registry.resolve(Some(SequenceId(9))),
            Err(AlpError::UnknownSequence(SequenceId(9)))
        ));
    }

    #[test]
    fn test_removing_last_clears_default() {
        let mut registry = SequenceRegistry::default();
        registry.insert(SequenceId(1), info());
        registry.insert(SequenceId(2), info());
        registry.remove(SequenceId(2));
        assert_eq!(registry.last(), None);
        assert!(matches!(registry.resolve(None), Err(AlpError::NoSequence)));
        assert_eq!(registry.ids(), vec![SequenceId(1)]);
    }

    #[test]
    fn test_removing_other_keeps_default() {
        let mut registry = SequenceRegistry::default();
        registry.insert(SequenceId(1), info());
        registry.insert(SequenceId(2), info());
        registry.remove(SequenceId(1));
        assert_eq!(registry.last(), Some(SequenceId(2)));
    }

    #[test]
    fn test_format_change_is_recorded() {
        let mut registry = SequenceRegistry::default();
        registry.insert(SequenceId(4), info());
        registry.set_format(SequenceId(4), DataFormat::BinaryTopDown);
        assert_eq!(
            registry.get(SequenceId(4)).map(|i| i.data_format),
            Some(DataFormat::BinaryTopDown)
        );
    }
}
