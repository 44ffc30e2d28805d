//! Partner-ownership access filters.

use crate::model::PartnerId;
use std::collections::HashSet;
use table_store::Filter;

/// A row that may belong to a partner.
pub trait Owned {
    fn partner_id(&self) -> Option<&PartnerId>;
}

/// Which rows a back-office user may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessScope {
    /// Administrators see every row.
    #[default]
    All,
    /// Partner accounts only see rows owned by one of these partners.
    Partners(HashSet<PartnerId>),
}

impl AccessScope {
    pub fn partners(ids: impl IntoIterator<Item = PartnerId>) -> Self {
        AccessScope::Partners(ids.into_iter().collect())
    }

    pub fn allows<T: Owned>(&self, row: &T) -> bool {
        match self {
            AccessScope::All => true,
            AccessScope::Partners(allowed) => row.partner_id().is_some_and(|id| allowed.contains(id)),
        }
    }

    /// Query predicate for this scope; `None` when every row is visible.
    pub fn filter<T: Owned + 'static>(&self) -> Option<Filter<T>> {
        match self {
            AccessScope::All => None,
            AccessScope::Partners(_) => {
                let scope = self.clone();
                Some(Filter::new(move |row: &T| scope.allows(row)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Row(Option<PartnerId>);

    impl Owned for Row {
        fn partner_id(&self) -> Option<&PartnerId> {
            self.0.as_ref()
        }
    }

    #[test]
    fn test_partner_scope_hides_foreign_and_unowned_rows() {
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let scope = AccessScope::partners([mine]);

        assert!(scope.allows(&Row(Some(mine))));
        assert!(!scope.allows(&Row(Some(theirs))));
        assert!(!scope.allows(&Row(None)));

        let filter = scope.filter::<Row>().unwrap();
        assert!(filter.matches(&Row(Some(mine))));
        assert!(AccessScope::All.filter::<Row>().is_none());
        assert!(AccessScope::All.allows(&Row(None)));
    }
}
