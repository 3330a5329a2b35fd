//! Local accounts and carts
//!
//! Users and the session marker live in two documents:
//!
//! - `vantage_users`: JSON array of every [`User`]
//! - `vantage_session`: JSON string holding the active username
//!
//! Every mutation reads the whole collection, changes it in memory and
//! writes it back. There is exactly one writer, so no locking is done here.

use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};
use crate::invariants::{assert_cart_invariants, assert_user_collection_invariants};
use crate::models::{CartItem, Product, User};
use crate::password::{hash_password, verify_password};
use crate::storage::DocumentRepository;

/// Document key for the user collection
pub const USERS_KEY: &str = "vantage_users";

/// Document key for the active session marker
pub const SESSION_KEY: &str = "vantage_session";

/// User accounts, sessions and carts on top of a document repository
pub struct AccountStore<R> {
    repo: R,
}

impl<R: DocumentRepository> AccountStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Underlying repository
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Create an account and make it the active session
    #[instrument(skip(self, password, name))]
    pub fn signup(&self, username: &str, password: &str, name: &str) -> Result<User> {
        let username = username.trim();
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::Validation("Name is required".into()));
        }
        if username.is_empty() {
            return Err(Error::Validation("Username is required".into()));
        }
        if password.is_empty() {
            return Err(Error::Validation("Password is required".into()));
        }

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.matches_username(username)) {
            return Err(Error::UsernameTaken);
        }

        let user = User::new(
            username.to_string(),
            name.to_string(),
            hash_password(password)?,
        );
        users.push(user.clone());
        self.save_users(&users)?;
        self.set_session(&user.username)?;

        info!(username = %user.username, "Account created");
        Ok(user)
    }

    /// Verify credentials and make the user the active session
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        let users = self.load_users()?;

        let mut matches = users.into_iter().filter(|u| u.matches_username(username));
        let user = match (matches.next(), matches.next()) {
            (Some(user), None) => user,
            _ => return Err(Error::InvalidCredentials),
        };

        if !verify_password(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        self.set_session(&user.username)?;
        info!(username = %user.username, "Logged in");
        Ok(user)
    }

    /// Clear the session marker. User data is kept.
    pub fn logout(&self) -> Result<()> {
        self.repo.remove_document(SESSION_KEY)?;
        debug!("Session cleared");
        Ok(())
    }

    /// Resolve the session marker to a user
    pub fn current_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.repo.get_document(SESSION_KEY)? else {
            return Ok(None);
        };
        let username: String = serde_json::from_str(&raw)?;

        let user = self
            .load_users()?
            .into_iter()
            .find(|u| u.matches_username(&username));
        if user.is_none() {
            warn!(%username, "Session points at a missing user");
        }
        Ok(user)
    }

    /// Find a user by username (case-insensitive)
    pub fn find_user(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .load_users()?
            .into_iter()
            .find(|u| u.matches_username(username)))
    }

    /// Save a product to the user's cart. A product whose URL is already in
    /// the cart is left alone.
    #[instrument(skip(self, product), fields(url = %product.url))]
    pub fn add_to_cart(&self, username: &str, product: &Product) -> Result<User> {
        let mut users = self.load_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.matches_username(username))
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        if user.has_in_cart(product) {
            debug!("Product already in cart");
            return Ok(user.clone());
        }

        user.cart.push(CartItem::new(product.clone()));
        assert_cart_invariants(user);
        let updated = user.clone();

        self.save_users(&users)?;
        Ok(updated)
    }

    /// Remove a cart entry by identifier (no-op when absent)
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, username: &str, item_id: &str) -> Result<User> {
        let mut users = self.load_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.matches_username(username))
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        user.cart.retain(|item| item.id != item_id);
        let updated = user.clone();

        self.save_users(&users)?;
        Ok(updated)
    }

    fn load_users(&self) -> Result<Vec<User>> {
        match self.repo.get_document(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        assert_user_collection_invariants(users);
        let raw = serde_json::to_string(users)?;
        self.repo.put_document(USERS_KEY, &raw)
    }

    fn set_session(&self, username: &str) -> Result<()> {
        let raw = serde_json::to_string(username)?;
        self.repo.put_document(SESSION_KEY, &raw)
    }
}
