use crate::*;
use indexmap::IndexSet;

/// Set of identities registered to vote in one election, in registration order.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct VoterRegistry {
    voters: IndexSet<Identity>,
}

impl VoterRegistry {
    /// Register an identity. Registering an identity twice is a no-op.
    ///
    /// Returns true if the identity was not registered before.
    pub(crate) fn insert(&mut self, voter: Identity) -> bool {
        self.voters.insert(voter)
    }

    pub fn is_registered(&self, voter: &Identity) -> bool {
        self.voters.contains(voter)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Identity> {
        self.voters.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let voter = Identity::new([1; IDENTITY_LEN]);
        let other = Identity::new([2; IDENTITY_LEN]);

        let mut registry = VoterRegistry::default();
        assert!(!registry.is_registered(&voter));

        assert!(registry.insert(voter));
        assert!(!registry.insert(voter));
        assert!(registry.insert(other));

        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered(&voter));
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![&voter, &other]);
    }
}
