//! Contact store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Hold the authoritative list of contacts and their favorite flags.
//! - Assign fresh ids from a monotonic counter.
//!
//! # Invariants
//! - No two stored contacts share an id.
//! - Fresh ids are strictly greater than every id seen or reserved so far.
//! - `remove` and `set_favorite` on an absent id are no-ops.

use crate::model::contact::{Contact, ContactId, NewContact};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_CONTACT_ID: ContactId = ContactId(1);

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for insert paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId(ContactId),
    /// Every `u64` id at or above the counter has been used.
    IdSpaceExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "contact id already present: {id}"),
            Self::IdSpaceExhausted => write!(f, "no fresh contact ids left"),
        }
    }
}

impl Error for StoreError {}

/// Store interface used by the mutation controller.
pub trait ContactRepository {
    /// Inserts at the head of insertion order and returns the effective id.
    ///
    /// Assigns a fresh id when `contact.id` is `None`; fails with
    /// `IdSpaceExhausted` when none is left.
    fn add(&mut self, contact: NewContact) -> StoreResult<ContactId>;
    /// Re-inserts a removed contact unchanged, at the tail of insertion order.
    fn restore(&mut self, contact: Contact) -> StoreResult<()>;
    /// Removes one contact; `None` when absent.
    fn remove(&mut self, id: ContactId) -> Option<Contact>;
    /// Sets the favorite flag; `None` when absent.
    fn set_favorite(&mut self, id: ContactId, value: bool) -> Option<&Contact>;
    fn get(&self, id: ContactId) -> Option<&Contact>;
    /// All contacts in insertion order.
    fn all(&self) -> &[Contact];
    /// Advances the fresh-id counter past `id`.
    fn reserve_ids_through(&mut self, id: ContactId);
    /// Appends snapshot records, skipping ids already present.
    ///
    /// Returns the number of records actually inserted.
    fn extend_snapshot(&mut self, contacts: Vec<Contact>) -> usize;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    fn favorite_count(&self) -> usize {
        self.all().iter().filter(|contact| contact.is_favorite).count()
    }
}

/// Vec-backed contact store.
///
/// Index 0 is the head of insertion order.
#[derive(Debug, Clone)]
pub struct MemoryContactRepository {
    contacts: Vec<Contact>,
    /// `None` once the id after `u64::MAX` has been requested.
    next_id: Option<ContactId>,
}

impl Default for MemoryContactRepository {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: Some(FIRST_CONTACT_ID),
        }
    }
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    fn observe_id(&mut self, id: ContactId) {
        if self.next_id.is_some_and(|next| id >= next) {
            self.next_id = id.checked_next();
        }
    }

    fn allocate_id(&mut self) -> StoreResult<ContactId> {
        let id = self.next_id.ok_or(StoreError::IdSpaceExhausted)?;
        self.next_id = id.checked_next();
        Ok(id)
    }
}

impl ContactRepository for MemoryContactRepository {
    fn add(&mut self, contact: NewContact) -> StoreResult<ContactId> {
        let id = match contact.id {
            Some(id) => {
                if self.position(id).is_some() {
                    return Err(StoreError::DuplicateId(id));
                }
                self.observe_id(id);
                id
            }
            None => self.allocate_id()?,
        };

        self.contacts.insert(0, contact.into_contact(id));
        Ok(id)
    }

    fn restore(&mut self, contact: Contact) -> StoreResult<()> {
        if self.position(contact.id).is_some() {
            return Err(StoreError::DuplicateId(contact.id));
        }
        self.observe_id(contact.id);
        self.contacts.push(contact);
        Ok(())
    }

    fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.position(id)?;
        Some(self.contacts.remove(index))
    }

    fn set_favorite(&mut self, id: ContactId, value: bool) -> Option<&Contact> {
        let index = self.position(id)?;
        let contact = &mut self.contacts[index];
        contact.is_favorite = value;
        Some(&*contact)
    }

    fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    fn all(&self) -> &[Contact] {
        &self.contacts
    }

    fn reserve_ids_through(&mut self, id: ContactId) {
        self.observe_id(id);
    }

    fn extend_snapshot(&mut self, contacts: Vec<Contact>) -> usize {
        let mut inserted = 0;
        for contact in contacts {
            if self.position(contact.id).is_some() {
                continue;
            }
            self.observe_id(contact.id);
            self.contacts.push(contact);
            inserted += 1;
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactRepository, MemoryContactRepository, StoreError};
    use crate::model::contact::{Contact, ContactId, NewContact};

    fn new_contact(id: Option<u64>, name: &str) -> NewContact {
        NewContact {
            id: id.map(ContactId),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn fresh_ids_are_strictly_increasing() {
        let mut repo = MemoryContactRepository::new();
        let first = repo.add(new_contact(None, "Ann")).unwrap();
        let second = repo.add(new_contact(None, "Bob")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn supplied_id_advances_counter() {
        let mut repo = MemoryContactRepository::new();
        repo.add(new_contact(Some(40), "Ann")).unwrap();
        let fresh = repo.add(new_contact(None, "Bob")).unwrap();
        assert_eq!(fresh, ContactId(41));
    }

    #[test]
    fn duplicate_supplied_id_is_rejected() {
        let mut repo = MemoryContactRepository::new();
        repo.add(new_contact(Some(7), "Ann")).unwrap();
        let err = repo.add(new_contact(Some(7), "Bob")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(ContactId(7)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn add_inserts_at_head_and_restore_appends() {
        let mut repo = MemoryContactRepository::new();
        let ann = repo.add(new_contact(None, "Ann")).unwrap();
        let bob = repo.add(new_contact(None, "Bob")).unwrap();
        assert_eq!(repo.all()[0].id, bob);

        let removed = repo.remove(bob).unwrap();
        repo.restore(removed).unwrap();
        let order = repo.all().iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(order, vec![ann, bob]);
    }

    #[test]
    fn absent_ids_are_no_ops() {
        let mut repo = MemoryContactRepository::new();
        repo.add(new_contact(None, "Ann")).unwrap();
        assert!(repo.remove(ContactId(99)).is_none());
        assert!(repo.set_favorite(ContactId(99), true).is_none());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.favorite_count(), 0);
    }

    #[test]
    fn reserved_ids_are_never_handed_out() {
        let mut repo = MemoryContactRepository::new();
        repo.reserve_ids_through(ContactId(10));
        let id = repo.add(new_contact(None, "Ann")).unwrap();
        assert_eq!(id, ContactId(11));

        let inserted = repo.extend_snapshot(vec![
            Contact::new(ContactId(3), "Cy", "cy@example.com", "1"),
            Contact::new(ContactId(11), "Dup", "dup@example.com", "2"),
        ]);
        assert_eq!(inserted, 1);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn exhausted_id_space_is_reported_instead_of_reused() {
        let mut repo = MemoryContactRepository::new();
        repo.extend_snapshot(vec![Contact::new(
            ContactId(u64::MAX),
            "Max",
            "max@example.com",
            "1",
        )]);

        let err = repo.add(new_contact(None, "Jess")).unwrap_err();
        assert_eq!(err, StoreError::IdSpaceExhausted);
        assert_eq!(repo.len(), 1);

        let supplied = repo.add(new_contact(Some(5), "Ann")).unwrap();
        assert_eq!(supplied, ContactId(5));
        assert_eq!(
            repo.add(new_contact(None, "Bob")).unwrap_err(),
            StoreError::IdSpaceExhausted
        );
    }
}
