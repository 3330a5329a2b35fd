//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::User;

/// Validate that a user's cart holds at most one entry per product URL and
/// that item identifiers are unique
pub fn assert_cart_invariants(user: &User) {
    for (i, item) in user.cart.iter().enumerate() {
        for other in user.cart.iter().skip(i + 1) {
            debug_assert!(
                item.url() != other.url(),
                "User {} has duplicate cart entries for {}",
                user.username,
                item.url()
            );
            debug_assert!(
                item.id != other.id,
                "User {} has duplicate cart item id {}",
                user.username,
                item.id
            );
        }
    }
}

/// Validate that usernames in a collection are unique ignoring case
pub fn assert_user_collection_invariants(users: &[User]) {
    for (i, user) in users.iter().enumerate() {
        debug_assert!(
            !users
                .iter()
                .skip(i + 1)
                .any(|other| other.matches_username(&user.username)),
            "Username {} is stored more than once",
            user.username
        );
    }
}
