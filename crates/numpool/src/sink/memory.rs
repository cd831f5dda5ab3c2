use crate::{NewNumber, PersistedNumber, PersistenceSink};
use core::convert::Infallible;

/// An in-memory [`PersistenceSink`].
///
/// Ids are assigned sequentially starting at 1 and keep increasing across
/// saves, the way an auto-increment key would.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    rows: Vec<PersistedNumber>,
}

impl MemorySink {
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Returns stored rows in insertion order, at most `limit` of them.
    pub fn get_all(&self, limit: Option<usize>) -> &[PersistedNumber] {
        let end = limit.map_or(self.rows.len(), |limit| limit.min(self.rows.len()));
        &self.rows[..end]
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PersistenceSink for MemorySink {
    type Err = Infallible;

    async fn persist(&mut self, records: Vec<NewNumber>) -> Result<(), Self::Err> {
        let first_id = self.rows.len() as u64 + 1;
        self.rows.reserve(records.len());
        self.rows.extend(
            records
                .into_iter()
                .zip(first_id..)
                .map(|(record, id)| record.with_id(id)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[i32]) -> Vec<NewNumber> {
        values.iter().copied().map(NewNumber::from_value).collect()
    }

    #[tokio::test]
    async fn assigns_sequential_ids_across_saves() {
        let mut sink = MemorySink::new();
        sink.persist(records(&[-3, -2])).await.unwrap();
        sink.persist(records(&[8])).await.unwrap();

        let ids: Vec<u64> = sink.get_all(None).iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(sink.get_all(None)[2].value, 8);
        assert!(!sink.get_all(None)[2].is_prime);
    }

    #[tokio::test]
    async fn limits_results() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.persist(records(&[1, 2, 3, 4])).await.unwrap();

        assert_eq!(sink.get_all(Some(2)).len(), 2);
        assert_eq!(sink.get_all(Some(10)).len(), 4);
        assert_eq!(sink.get_all(Some(0)).len(), 0);
        assert_eq!(sink.len(), 4);
    }
}
