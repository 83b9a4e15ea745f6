use crate::*;

/// The single election administrator.
///
/// Fixed when the ledger is constructed; there is no way to transfer it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority {
    admin: Identity,
}

impl Authority {
    pub fn new(admin: Identity) -> Self {
        Authority { admin }
    }

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    /// Reject any caller other than the administrator.
    pub fn authorize(&self, caller: &Identity) -> Result<(), ValidationError> {
        if *caller != self.admin {
            return Err(ValidationError::NotAdmin);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_authorize() {
        let admin = Identity::new([0xaa; IDENTITY_LEN]);
        let other = Identity::new([0xbb; IDENTITY_LEN]);
        let authority = Authority::new(admin);

        assert_eq!(authority.admin(), &admin);
        assert!(authority.authorize(&admin).is_ok());
        assert_eq!(authority.authorize(&other), Err(ValidationError::NotAdmin));
    }
}
