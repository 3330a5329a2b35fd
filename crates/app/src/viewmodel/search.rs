//! Search view model
//!
//! Searches run as spawned tasks and report back over a channel. Each one
//! carries the generation it was started under; only the latest generation
//! may change the view.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use vantage_core::SearchResult;
use vantage_net::{Dispatcher, Error as NetError, GenerativeBackend};

use super::{SearchState, ViewModel, ViewState};

/// A search the view is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Finished search, successful or not
#[derive(Debug)]
pub struct SearchOutcome {
    pub generation: u64,
    pub result: Result<SearchResult, String>,
}

impl ViewModel {
    /// Switch to the loading state for `query`. Blank queries are ignored.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let generation = self.generation.advance();
        self.view = ViewState::Results;
        self.search = SearchState::Loading;
        self.query = query.to_string();

        Some(SearchTicket {
            generation,
            query: self.query.clone(),
        })
    }

    /// Re-submit the current query
    pub fn retry(&mut self) -> Option<SearchTicket> {
        let query = self.query.clone();
        self.begin_search(&query)
    }

    /// Apply a finished search. Returns false when the outcome was stale.
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if !self.generation.is_current(outcome.generation) {
            debug!(
                generation = outcome.generation,
                current = self.generation.current(),
                "Discarding stale search outcome"
            );
            return false;
        }

        self.search = match outcome.result {
            Ok(result) => SearchState::Loaded(result),
            Err(message) => SearchState::Failed(message),
        };
        true
    }

    /// Back to the home view; anything still in flight becomes stale
    pub fn reset_home(&mut self) {
        self.generation.advance();
        self.view = ViewState::Home;
        self.search = SearchState::Idle;
        self.query.clear();
    }
}

/// Run the search for `ticket` in the background and send the outcome to
/// `tx`. Without a dispatcher (no API key) the search fails immediately.
pub fn spawn_search<B>(
    dispatcher: Option<Arc<Dispatcher<B>>>,
    ticket: SearchTicket,
    tx: mpsc::UnboundedSender<SearchOutcome>,
) where
    B: GenerativeBackend + 'static,
{
    let SearchTicket { generation, query } = ticket;
    info!(generation, %query, "Starting search");

    let Some(dispatcher) = dispatcher else {
        let _ = tx.send(SearchOutcome {
            generation,
            result: Err(NetError::MissingApiKey.user_message()),
        });
        return;
    };

    tokio::spawn(async move {
        let result = dispatcher
            .search(&query)
            .await
            .map_err(|e| e.user_message());
        // Receiver gone means the app is shutting down
        let _ = tx.send(SearchOutcome { generation, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use vantage_net::{GeneratedImage, Result as NetResult, SEARCH_FAILED_MESSAGE};

    const NAVY_BLAZER: &str = r#"{"summary":"Found 1 option.","products":[{"title":"Navy Blazer","price":"$89.99","storeName":"Acme","url":"https://acme.com/dp/123","description":"Wool blend"}]}"#;

    fn result(summary: &str) -> SearchResult {
        SearchResult {
            summary: summary.to_string(),
            products: Vec::new(),
            generated_image: None,
        }
    }

    #[test]
    fn test_blank_query_ignored() {
        let mut vm = ViewModel::new();
        assert!(vm.begin_search("   ").is_none());
        assert_eq!(vm.view, ViewState::Home);
    }

    #[test]
    fn test_begin_search_enters_loading() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("  navy blazer ").unwrap();

        assert_eq!(ticket.query, "navy blazer");
        assert_eq!(vm.view, ViewState::Results);
        assert_eq!(vm.search, SearchState::Loading);
    }

    #[test]
    fn test_stale_outcome_discarded() {
        let mut vm = ViewModel::new();
        let slow = vm.begin_search("first").unwrap();
        let fast = vm.begin_search("second").unwrap();

        assert!(vm.apply_outcome(SearchOutcome {
            generation: fast.generation,
            result: Ok(result("second")),
        }));
        assert!(!vm.apply_outcome(SearchOutcome {
            generation: slow.generation,
            result: Ok(result("first")),
        }));

        assert_eq!(vm.results().unwrap().summary, "second");
        assert_eq!(vm.query, "second");
    }

    #[test]
    fn test_reset_home_invalidates_pending() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("boots").unwrap();
        vm.reset_home();

        assert!(!vm.apply_outcome(SearchOutcome {
            generation: ticket.generation,
            result: Ok(result("boots")),
        }));
        assert_eq!(vm.view, ViewState::Home);
        assert_eq!(vm.search, SearchState::Idle);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("boots").unwrap();
        vm.apply_outcome(SearchOutcome {
            generation: ticket.generation,
            result: Err(SEARCH_FAILED_MESSAGE.to_string()),
        });
        assert!(matches!(vm.search, SearchState::Failed(_)));

        let again = vm.retry().unwrap();
        assert_eq!(again.query, "boots");
        assert!(again.generation > ticket.generation);
        assert_eq!(vm.search, SearchState::Loading);
    }

    struct FixedBackend {
        text: &'static str,
        delay: Duration,
    }

    #[async_trait]
    impl GenerativeBackend for FixedBackend {
        async fn search_completion(&self, _prompt: &str) -> NetResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok(self.text.to_string())
        }

        async fn generate_image(&self, _prompt: &str) -> NetResult<Option<GeneratedImage>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_spawned_search_reports_back() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Arc::new(Dispatcher::new(FixedBackend {
            text: NAVY_BLAZER,
            delay: Duration::ZERO,
        }));

        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("navy blazer").unwrap();
        spawn_search(Some(dispatcher), ticket, tx);

        let outcome = rx.recv().await.unwrap();
        assert!(vm.apply_outcome(outcome));
        assert_eq!(vm.results().unwrap().products.len(), 1);
    }

    #[tokio::test]
    async fn test_spawned_malformed_answer_fails_generically() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Arc::new(Dispatcher::new(FixedBackend {
            text: "no json here",
            delay: Duration::ZERO,
        }));

        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("navy blazer").unwrap();
        spawn_search(Some(dispatcher), ticket, tx);

        vm.apply_outcome(rx.recv().await.unwrap());
        assert_eq!(
            vm.search,
            SearchState::Failed(SEARCH_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_slow_earlier_search_does_not_overwrite() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let slow = Arc::new(Dispatcher::new(FixedBackend {
            text: r#"{"summary":"old","products":[]}"#,
            delay: Duration::from_millis(100),
        }));
        let fast = Arc::new(Dispatcher::new(FixedBackend {
            text: r#"{"summary":"new","products":[]}"#,
            delay: Duration::ZERO,
        }));

        let mut vm = ViewModel::new();
        let first = vm.begin_search("old").unwrap();
        spawn_search(Some(slow), first, tx.clone());
        let second = vm.begin_search("new").unwrap();
        spawn_search(Some(fast), second, tx);

        let mut applied = 0;
        while let Some(outcome) = rx.recv().await {
            if vm.apply_outcome(outcome) {
                applied += 1;
            }
        }

        assert_eq!(applied, 1);
        assert_eq!(vm.results().unwrap().summary, "new");
    }

    #[tokio::test]
    async fn test_without_dispatcher_fails_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut vm = ViewModel::new();
        let ticket = vm.begin_search("boots").unwrap();

        spawn_search::<FixedBackend>(None, ticket, tx);
        vm.apply_outcome(rx.recv().await.unwrap());

        match &vm.search {
            SearchState::Failed(message) => assert!(message.contains("GEMINI_API_KEY")),
            other => panic!("unexpected state {:?}", other),
        }
    }
}
