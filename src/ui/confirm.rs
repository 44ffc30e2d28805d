//! Confirm-before-delete.

/// Two states: nothing pending, or one row waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteConfirmation<Id> {
    Idle,
    Confirming(Id),
}

impl<Id> Default for DeleteConfirmation<Id> {
    fn default() -> Self {
        DeleteConfirmation::Idle
    }
}

impl<Id> DeleteConfirmation<Id> {
    /// Asks for confirmation. A new request replaces a pending one.
    pub fn request(&mut self, id: Id) {
        *self = DeleteConfirmation::Confirming(id);
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// Returns the confirmed id and goes back to idle.
    pub fn confirm(&mut self) -> Option<Id> {
        match std::mem::replace(self, DeleteConfirmation::Idle) {
            DeleteConfirmation::Confirming(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&Id> {
        match self {
            DeleteConfirmation::Confirming(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_consumes_request() {
        let mut confirm = DeleteConfirmation::default();
        assert_eq!(confirm.confirm(), None);

        confirm.request(3_u64);
        confirm.request(4);
        assert_eq!(confirm.pending(), Some(&4));
        assert_eq!(confirm.confirm(), Some(4));
        assert_eq!(confirm, DeleteConfirmation::Idle);
    }

    #[test]
    fn test_cancel() {
        let mut confirm = DeleteConfirmation::Confirming(1_u64);
        confirm.cancel();
        assert_eq!(confirm.pending(), None);
        assert_eq!(confirm.confirm(), None);
    }
}
