//! Plain-text rendering of the view model

use std::fmt::{self, Write as _};

use chrono::Local;
use vantage_core::{CartItem, Product, SearchResult};

use crate::viewmodel::{cart::is_saved, AuthMode, SearchState, ViewModel, ViewState};

/// Searches offered on the home screen
pub const SUGGESTIONS: &[&str] = &[
    "Navy blazer with gold buttons",
    "Casual white linen pants cheap",
    "Running shoes under $60",
    "Black silk dress midi",
];

const RULE: &str = "------------------------------------------------------------";

/// Render the whole screen
pub fn render(vm: &ViewModel, favicon_size: u32) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = screen(&mut out, vm, favicon_size);
    out
}

fn screen(out: &mut String, vm: &ViewModel, favicon_size: u32) -> fmt::Result {
    header(out, vm)?;

    match vm.view {
        ViewState::Home => home(out)?,
        ViewState::Results => match &vm.search {
            SearchState::Idle => home(out)?,
            SearchState::Loading => loading(out, &vm.query)?,
            SearchState::Failed(message) => failed(out, message)?,
            SearchState::Loaded(result) => results(out, vm, result, favicon_size)?,
        },
    }

    if vm.cart_open {
        cart_drawer(out, vm, favicon_size)?;
    }
    if vm.auth.open {
        auth_modal(out, vm)?;
    }
    if let Some(notice) = &vm.notice {
        writeln!(out, "\n> {}", notice)?;
    }
    Ok(())
}

fn header(out: &mut String, vm: &ViewModel) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    match &vm.user {
        Some(user) => writeln!(
            out,
            "VANTAGE   Hi, {}   Cart ({})",
            user.name,
            user.cart.len()
        )?,
        None => writeln!(out, "VANTAGE   Sign in to save items")?,
    }
    writeln!(out, "{}", RULE)
}

fn home(out: &mut String) -> fmt::Result {
    writeln!(out, "\nFind the best price for anything.")?;
    writeln!(
        out,
        "Describe what you want and we'll scan stores for direct product pages.\n"
    )?;
    writeln!(out, "Try one of these:")?;
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, suggestion)?;
    }
    writeln!(out, "\nType `search <what you want>` or a number above.")
}

fn loading(out: &mut String, query: &str) -> fmt::Result {
    writeln!(out, "\nScanning stores for \"{}\"...", query)?;
    writeln!(out, "Comparing prices and generating a preview.")
}

fn failed(out: &mut String, message: &str) -> fmt::Result {
    writeln!(out, "\n{}", message)?;
    writeln!(out, "Type `retry` to search again or `home` to start over.")
}

fn results(
    out: &mut String,
    vm: &ViewModel,
    result: &SearchResult,
    favicon_size: u32,
) -> fmt::Result {
    writeln!(out, "\nResults for \"{}\"", vm.query)?;
    writeln!(out, "{}\n", result.summary)?;

    match &result.generated_image {
        Some(image) => writeln!(out, "Preview: AI image ready ({} bytes)", image.len())?,
        None => writeln!(out, "Preview: No preview available")?,
    }

    writeln!(out, "\n{} Items", result.products.len())?;
    if result.is_empty() {
        writeln!(out, "\nNo specific product pages found.")?;
        return writeln!(out, "Try a broader search term.");
    }

    for (i, product) in result.products.iter().enumerate() {
        product_card(out, i + 1, product, is_saved(vm, product), favicon_size)?;
    }
    writeln!(out, "\nType `save <n>` to keep an item.")
}

fn product_card(
    out: &mut String,
    number: usize,
    product: &Product,
    saved: bool,
    favicon_size: u32,
) -> fmt::Result {
    let marker = if saved { "  [Saved]" } else { "" };
    writeln!(out, "\n{:>2}. {}{}", number, product.title, marker)?;
    writeln!(out, "    {}  @ {}", product.price, product.store_name)?;
    if !product.description.is_empty() {
        writeln!(out, "    {}", product.description)?;
    }
    writeln!(out, "    {}", product.url)?;
    writeln!(out, "    image: {}", product.display_image(favicon_size))
}

fn cart_drawer(out: &mut String, vm: &ViewModel, favicon_size: u32) -> fmt::Result {
    let items: &[CartItem] = vm.user.as_ref().map_or(&[], |u| u.cart.as_slice());

    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "YOUR CART ({})", items.len())?;
    writeln!(out, "{}", RULE)?;

    if items.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return writeln!(out, "Save items from your search results.");
    }

    for (i, item) in items.iter().enumerate() {
        let added = item.added_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");

        writeln!(out, "{:>2}. {}", i + 1, item.product.title)?;
        writeln!(
            out,
            "    {}  @ {}   saved {}",
            item.product.price, item.product.store_name, added
        )?;
        writeln!(out, "    Buy now: {}", item.url())?;
        writeln!(out, "    image: {}", item.product.display_image(favicon_size))?;
    }
    writeln!(out, "\nType `remove <n>` to drop an item, `close` to hide the cart.")
}

fn auth_modal(out: &mut String, vm: &ViewModel) -> fmt::Result {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "{}", vm.auth.mode.label())?;
    writeln!(out, "{}", RULE)?;

    match vm.auth.mode {
        AuthMode::Login => {
            writeln!(out, "Sign in to save deals to your cart.")?;
            writeln!(out, "  login <username> <password>")?;
            writeln!(out, "No account? signup <username> <password> <name>")?;
        }
        AuthMode::Signup => {
            writeln!(out, "Join to start saving items.")?;
            writeln!(out, "  signup <username> <password> <name>")?;
            writeln!(out, "Have an account? login <username> <password>")?;
        }
    }

    if let Some(error) = &vm.auth.error {
        writeln!(out, "\n! {}", error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::SearchOutcome;
    use vantage_core::User;

    fn blazer(image_url: Option<&str>) -> Product {
        Product {
            title: "Navy Blazer".into(),
            price: "$89.99".into(),
            store_name: "Acme".into(),
            url: "https://acme.com/dp/123".into(),
            image_url: image_url.map(String::from),
            description: "Wool blend".into(),
            currency: None,
        }
    }

    fn loaded(vm: &mut ViewModel, products: Vec<Product>, image: Option<&str>) {
        let ticket = vm.begin_search("navy blazer").unwrap();
        vm.apply_outcome(SearchOutcome {
            generation: ticket.generation,
            result: Ok(SearchResult {
                summary: "Found 1 option.".into(),
                products,
                generated_image: image.map(String::from),
            }),
        });
    }

    #[test]
    fn test_home_lists_suggestions() {
        let screen = render(&ViewModel::new(), 128);
        assert!(screen.contains("1. Navy blazer with gold buttons"));
        assert!(screen.contains("4. Black silk dress midi"));
        assert!(screen.contains("Sign in to save items"));
    }

    #[test]
    fn test_loading_and_failed() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("boots").unwrap();
        assert!(render(&vm, 128).contains("Scanning stores for \"boots\""));

        vm.apply_outcome(SearchOutcome {
            generation: ticket.generation,
            result: Err("search failed".into()),
        });
        let screen = render(&vm, 128);
        assert!(screen.contains("search failed"));
        assert!(screen.contains("`retry`"));
    }

    #[test]
    fn test_results_with_favicon_fallback() {
        let mut vm = ViewModel::new();
        loaded(&mut vm, vec![blazer(None)], None);

        let screen = render(&vm, 64);
        assert!(screen.contains("Found 1 option."));
        assert!(screen.contains("No preview available"));
        assert!(screen.contains(" 1. Navy Blazer"));
        assert!(screen.contains("$89.99  @ Acme"));
        assert!(screen.contains("image: https://t2.gstatic.com/faviconV2?"));
        assert!(screen.contains("size=64"));
    }

    #[test]
    fn test_results_mark_saved_items() {
        let mut vm = ViewModel::new();
        let mut user = User::new("alice".into(), "Alice".into(), "hash".into());
        user.cart.push(CartItem::new(blazer(None)));
        vm.user = Some(user);
        loaded(
            &mut vm,
            vec![blazer(Some("https://acme.com/blazer.jpg"))],
            Some("data:image/png;base64,AAEC"),
        );

        let screen = render(&vm, 128);
        assert!(screen.contains("Navy Blazer  [Saved]"));
        assert!(screen.contains("image: https://acme.com/blazer.jpg"));
        assert!(screen.contains("AI image ready"));
        assert!(screen.contains("Cart (1)"));
    }

    #[test]
    fn test_empty_results() {
        let mut vm = ViewModel::new();
        loaded(&mut vm, Vec::new(), None);
        assert!(render(&vm, 128).contains("No specific product pages found."));
    }

    #[test]
    fn test_cart_drawer_lists_items_in_local_time() {
        let mut vm = ViewModel::new();
        let mut user = User::new("alice".into(), "Alice".into(), "hash".into());
        let item = CartItem::new(blazer(None));
        let added = item
            .added_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        user.cart.push(item);
        vm.user = Some(user);
        vm.open_cart();

        let screen = render(&vm, 128);
        assert!(screen.contains("YOUR CART (1)"));
        assert!(screen.contains(" 1. Navy Blazer"));
        assert!(screen.contains(&format!("$89.99  @ Acme   saved {}", added)));
        assert!(screen.contains("Buy now: https://acme.com/dp/123"));
    }

    #[test]
    fn test_overlays() {
        let mut vm = ViewModel::new();
        vm.user = Some(User::new("alice".into(), "Alice".into(), "hash".into()));
        vm.open_cart();
        assert!(render(&vm, 128).contains("Your cart is empty"));

        vm.close_overlays();
        crate::viewmodel::auth::open(&mut vm, AuthMode::Signup);
        vm.auth.error = Some("Username already taken".into());
        let screen = render(&vm, 128);
        assert!(screen.contains("Create Account"));
        assert!(screen.contains("! Username already taken"));
    }
}
