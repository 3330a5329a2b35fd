//! Authentication view model

use tracing::{error, warn};
use vantage_core::{AccountStore, DocumentRepository};

use super::{AuthMode, ViewModel};

/// Open the auth modal in the given mode
pub fn open(vm: &mut ViewModel, mode: AuthMode) {
    vm.auth.open = true;
    vm.auth.mode = mode;
    vm.auth.error = None;
}

/// Pick up the user left logged in by a previous run
pub fn restore_session<R: DocumentRepository>(vm: &mut ViewModel, accounts: &AccountStore<R>) {
    match accounts.current_user() {
        Ok(user) => vm.user = user,
        Err(e) => error!(error = %e, "Failed to restore session"),
    }
}

/// Submit the login form. Errors stay inline on the modal.
pub fn login<R: DocumentRepository>(
    vm: &mut ViewModel,
    accounts: &AccountStore<R>,
    username: &str,
    password: &str,
) -> bool {
    open(vm, AuthMode::Login);

    match accounts.login(username, password) {
        Ok(user) => {
            vm.notice = Some(format!("Welcome back, {}!", user.name));
            vm.user = Some(user);
            vm.close_overlays();
            true
        }
        Err(e) => {
            warn!(error = %e, "Login failed");
            vm.auth.error = Some(e.to_string());
            false
        }
    }
}

/// Submit the signup form. Errors stay inline on the modal.
pub fn signup<R: DocumentRepository>(
    vm: &mut ViewModel,
    accounts: &AccountStore<R>,
    username: &str,
    password: &str,
    name: &str,
) -> bool {
    open(vm, AuthMode::Signup);

    match accounts.signup(username, password, name) {
        Ok(user) => {
            vm.notice = Some(format!("Welcome, {}!", user.name));
            vm.user = Some(user);
            vm.close_overlays();
            true
        }
        Err(e) => {
            warn!(error = %e, "Signup failed");
            vm.auth.error = Some(e.to_string());
            false
        }
    }
}

pub fn logout<R: DocumentRepository>(vm: &mut ViewModel, accounts: &AccountStore<R>) {
    if let Err(e) = accounts.logout() {
        error!(error = %e, "Failed to clear session");
    }
    vm.user = None;
    vm.cart_open = false;
}
