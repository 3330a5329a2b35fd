//! View model for the terminal UI
//!
//! Two top-level views (home, results) plus two overlays (auth, cart) that
//! open and close independently of the view underneath.

pub mod auth;
pub mod cart;
pub mod search;

use vantage_core::{SearchResult, User};
use vantage_net::SearchGeneration;

pub use search::{SearchOutcome, SearchTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Home,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Loaded(SearchResult),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome Back",
            AuthMode::Signup => "Create Account",
        }
    }
}

/// Auth modal state
#[derive(Debug, Clone)]
pub struct AuthPanel {
    pub open: bool,
    pub mode: AuthMode,
    /// Inline error from the last submit
    pub error: Option<String>,
}

impl Default for AuthPanel {
    fn default() -> Self {
        Self {
            open: false,
            mode: AuthMode::Login,
            error: None,
        }
    }
}

/// Everything the renderer needs
pub struct ViewModel {
    pub view: ViewState,
    pub search: SearchState,
    /// Query behind the current results (or the one loading)
    pub query: String,
    pub user: Option<User>,
    pub auth: AuthPanel,
    pub cart_open: bool,
    /// One-line status message, cleared on the next command
    pub notice: Option<String>,
    generation: SearchGeneration,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            view: ViewState::Home,
            search: SearchState::Idle,
            query: String::new(),
            user: None,
            auth: AuthPanel::default(),
            cart_open: false,
            notice: None,
            generation: SearchGeneration::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn cart_len(&self) -> usize {
        self.user.as_ref().map_or(0, |u| u.cart.len())
    }

    /// Products of the current results, if any
    pub fn results(&self) -> Option<&SearchResult> {
        match &self.search {
            SearchState::Loaded(result) => Some(result),
            _ => None,
        }
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    /// Close whichever overlays are open
    pub fn close_overlays(&mut self) {
        self.cart_open = false;
        self.auth.open = false;
        self.auth.error = None;
    }
}
