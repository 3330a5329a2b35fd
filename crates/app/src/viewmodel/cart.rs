//! Cart view model

use tracing::error;
use vantage_core::{AccountStore, DocumentRepository, Error, Product};

use super::{AuthMode, ViewModel};

/// Whether `product` is already saved for the current user
pub fn is_saved(vm: &ViewModel, product: &Product) -> bool {
    vm.user.as_ref().is_some_and(|u| u.has_in_cart(product))
}

/// Save result number `index` (1-based) to the cart. Logged-out users get
/// the login modal instead.
pub fn save_result<R: DocumentRepository>(
    vm: &mut ViewModel,
    accounts: &AccountStore<R>,
    index: usize,
) {
    let Some(product) = vm
        .results()
        .and_then(|r| index.checked_sub(1).and_then(|i| r.products.get(i)))
        .cloned()
    else {
        vm.notice = Some(format!("No result number {}", index));
        return;
    };

    let Some(username) = vm.user.as_ref().map(|u| u.username.clone()) else {
        super::auth::open(vm, AuthMode::Login);
        return;
    };

    match accounts.add_to_cart(&username, &product) {
        Ok(user) => {
            vm.notice = Some(format!("Saved \"{}\"", product.title));
            vm.user = Some(user);
        }
        Err(e) => log_cart_error(&e),
    }
}

/// Remove cart entry number `index` (1-based)
pub fn remove_item<R: DocumentRepository>(
    vm: &mut ViewModel,
    accounts: &AccountStore<R>,
    index: usize,
) {
    let Some(user) = vm.user.as_ref() else {
        return;
    };
    let Some(item) = index.checked_sub(1).and_then(|i| user.cart.get(i)) else {
        vm.notice = Some(format!("No cart item number {}", index));
        return;
    };

    let username = user.username.clone();
    let item_id = item.id.clone();

    match accounts.remove_from_cart(&username, &item_id) {
        Ok(user) => vm.user = Some(user),
        Err(e) => log_cart_error(&e),
    }
}

/// Cart failures are logged only; the UI keeps its last known cart
fn log_cart_error(e: &Error) {
    match e {
        Error::UserNotFound(username) => {
            error!(%username, "Cart update for a user with no record")
        }
        other => error!(error = %other, "Cart update failed"),
    }
}
