use crate::*;
use std::convert::TryFrom;

/// Read access to the election registry
pub trait Store {
    /// Look up an election, if it exists
    fn election(&self, id: ElectionId) -> Option<&Election>;

    /// Number of elections created so far
    fn election_count(&self) -> u64;

    /// Get an election, failing with `ElectionNotExists`.
    ///
    /// Every operation addressing an election goes through this lookup.
    fn get_election(&self, id: ElectionId) -> Result<&Election, ValidationError> {
        self.election(id)
            .ok_or(ValidationError::ElectionNotExists(id))
    }

    /// Id the next created election will receive
    fn next_election_id(&self) -> ElectionId {
        ElectionId(self.election_count())
    }
}

/// In-memory election registry.
///
/// Elections are stored densely: the id of an election is its index. Elections
/// are never removed, so ids are never reused.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct MemStore {
    elections: Vec<Election>,
}

impl MemStore {
    /// Create a new election and return its id
    pub fn create(&mut self, name: String) -> ElectionId {
        let id = self.next_election_id();
        self.elections.push(Election::new(id, name));
        id
    }

    pub fn get_election_mut(&mut self, id: ElectionId) -> Result<&mut Election, ValidationError> {
        usize::try_from(id.0)
            .ok()
            .and_then(move |i| self.elections.get_mut(i))
            .ok_or(ValidationError::ElectionNotExists(id))
    }

    /// All elections in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, Election> {
        self.elections.iter()
    }
}

impl Store for MemStore {
    fn election(&self, id: ElectionId) -> Option<&Election> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.elections.get(i))
    }

    fn election_count(&self) -> u64 {
        self.elections.len() as u64
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut store = MemStore::default();
        assert_eq!(store.next_election_id(), ElectionId(0));

        assert_eq!(store.create("First".into()), ElectionId(0));
        assert_eq!(store.create("Second".into()), ElectionId(1));
        assert_eq!(store.election_count(), 2);

        assert_eq!(store.get_election(ElectionId(1)).unwrap().name(), "Second");
        assert_eq!(
            store.get_election(ElectionId(2)).unwrap_err(),
            ValidationError::ElectionNotExists(ElectionId(2))
        );
        assert!(store.get_election_mut(ElectionId(5)).is_err());

        let names: Vec<&str> = store.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_out_of_range_ids_never_alias() {
        let mut store = MemStore::default();
        store.create("Only".into());

        for id in &[1 << 32, (1 << 32) + 1, u64::MAX] {
            let id = ElectionId(*id);
            assert!(store.election(id).is_none());
            assert_eq!(
                store.get_election(id).unwrap_err(),
                ValidationError::ElectionNotExists(id)
            );
            assert!(store.get_election_mut(id).is_err());
        }
    }

    #[test]
    fn test_serializes_for_inspection() {
        let mut store = MemStore::default();
        store.create("Only".into());

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["elections"][0]["name"], "Only");
        assert_eq!(json["elections"][0]["state"], "initiated");
    }
}
