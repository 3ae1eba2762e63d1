use std::collections::HashMap;

use orderdesk_core::{CustomerId, DomainError, DomainResult};

use crate::customer::Customer;

/// In-memory customer records, keyed by id.
///
/// Ids are unique, so keyed lookup preserves first-and-only-match semantics.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: HashMap<CustomerId, Customer>,
}

impl CustomerDirectory {
    pub fn from_customers(customers: Vec<Customer>) -> DomainResult<Self> {
        let mut map = HashMap::with_capacity(customers.len());
        for customer in customers {
            let id = customer.id_typed();
            if map.insert(id, customer).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate customer id in directory: {id}"
                )));
            }
        }
        Ok(Self { customers: map })
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Look up a customer by exact id equality.
    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// All customers, id-sorted, for directory listings.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut listing: Vec<&Customer> = self.customers.values().collect();
        listing.sort_by_key(|c| c.id_typed());
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: u64, last: &str) -> Customer {
        Customer::new(CustomerId::new(id), last, "First", "1 Street", "00000", "000").unwrap()
    }

    #[test]
    fn lookup_is_by_exact_id() {
        let directory =
            CustomerDirectory::from_customers(vec![customer(2, "Akhras"), customer(1, "Smith")])
                .unwrap();
        assert_eq!(directory.get(CustomerId::new(1)).unwrap().last_name(), "Smith");
        assert!(directory.get(CustomerId::new(9)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected_at_load() {
        let err =
            CustomerDirectory::from_customers(vec![customer(1, "Smith"), customer(1, "Akhras")])
                .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn listing_is_id_sorted() {
        let directory =
            CustomerDirectory::from_customers(vec![customer(3, "West"), customer(1, "Smith")])
                .unwrap();
        let ids: Vec<u64> = directory.customers().iter().map(|c| c.id_typed().value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
