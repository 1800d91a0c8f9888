//! Visible-list projection over the contact store.
//!
//! # Responsibility
//! - Filter contacts by a case-insensitive name substring.
//! - Order results favorites-first, then by locale-aware name.
//!
//! # Invariants
//! - `visible` is pure: identical input yields identical output order.
//! - Names that compare equal keep their relative input order.

use crate::model::contact::Contact;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let needle = term.to_lowercase();
        Self { term, needle }
    }

    /// Raw term as typed by the user.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Blank terms match every contact.
    pub fn is_match_all(&self) -> bool {
        self.term.trim().is_empty()
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.is_match_all() || contact.name.to_lowercase().contains(&self.needle)
    }
}

/// Returns `sort(filter(contacts, term))`.
pub fn visible<'a>(contacts: &'a [Contact], term: &str) -> Vec<&'a Contact> {
    visible_for(contacts, &SearchQuery::new(term))
}

/// Same as [`visible`] with a pre-built query.
pub fn visible_for<'a>(contacts: &'a [Contact], query: &SearchQuery) -> Vec<&'a Contact> {
    let mut keyed = contacts
        .iter()
        .filter(|contact| query.matches(contact))
        .map(|contact| (collation_key(&contact.name), contact))
        .collect::<Vec<_>>();

    // sort_by is stable; equal names keep input order.
    keyed.sort_by(|(left_key, left), (right_key, right)| {
        right.is_favorite.cmp(&left.is_favorite).then_with(|| {
            compare_keyed(
                (left_key.as_str(), left.name.as_str()),
                (right_key.as_str(), right.name.as_str()),
            )
        })
    });

    keyed.into_iter().map(|(_, contact)| contact).collect()
}

/// Locale-aware name comparison used by the visible-list sort.
///
/// Accents and case are ignored first; then lowercase sorts before
/// uppercase; then unaccented before accented.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    compare_keyed(
        (collation_key(left).as_str(), left),
        (collation_key(right).as_str(), right),
    )
}

/// Compares `(collation_key(name), name)` pairs.
fn compare_keyed((left_key, left): (&str, &str), (right_key, right): (&str, &str)) -> Ordering {
    left_key
        .cmp(right_key)
        .then_with(|| case_order(left, right))
        .then_with(|| left.nfc().cmp(right.nfc()))
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().filter(|c| !is_combining_mark(*c))
}

fn collation_key(value: &str) -> String {
    base_letters(value).flat_map(char::to_lowercase).collect()
}

fn case_order(left: &str, right: &str) -> Ordering {
    for (l, r) in base_letters(left).zip(base_letters(right)) {
        if l == r {
            continue;
        }
        if l.is_lowercase() && r.is_uppercase() {
            return Ordering::Less;
        }
        if l.is_uppercase() && r.is_lowercase() {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}
