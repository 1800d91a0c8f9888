//! Derived statistics over the contact store.
//!
//! # Invariants
//! - All values are recomputed from the store; nothing here is cached.
//! - "Most recent" means the highest id, not the head of insertion order.

use crate::model::contact::Contact;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Dashboard-style statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInsights {
    pub total: usize,
    pub favorites: usize,
    /// Count of distinct uppercased first letters.
    pub unique_initials: usize,
    /// Name of the contact with the highest id.
    pub most_recent: Option<String>,
}

/// Computes insights over every stored contact.
pub fn compute_insights(contacts: &[Contact]) -> ContactInsights {
    let initials = contacts
        .iter()
        .filter_map(Contact::initial)
        .collect::<BTreeSet<_>>();
    let most_recent = contacts
        .iter()
        .max_by_key(|contact| contact.id)
        .map(|contact| contact.name.clone());

    ContactInsights {
        total: contacts.len(),
        favorites: contacts.iter().filter(|contact| contact.is_favorite).count(),
        unique_initials: initials.len(),
        most_recent,
    }
}

/// "Showing N of M" line under the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub showing: usize,
    pub total: usize,
    pub favorites: usize,
}

impl Display for ListSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} contacts", self.showing, self.total)?;
        if self.favorites > 0 {
            write!(f, " · {} favorited", self.favorites)?;
        }
        Ok(())
    }
}

/// Why the visible list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// A non-empty term matched nothing.
    NoMatches(String),
    /// The store is empty and no term is set.
    NoContacts,
}

impl EmptyState {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::NoMatches(_) => "No contacts found",
            Self::NoContacts => "No contacts yet",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::NoMatches(term) => {
                format!("No contacts match \"{term}\". Try a different search term.")
            }
            Self::NoContacts => "Add your first contact to get started!".to_string(),
        }
    }
}
