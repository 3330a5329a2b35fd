//! Interactive terminal shell
//!
//! Reads commands from stdin and search outcomes from the background tasks,
//! and redraws the screen whenever either one changes the view model.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;
use vantage_core::{AccountStore, DocumentRepository};
use vantage_net::{Dispatcher, GenerativeBackend};

use crate::commands::{self, Command, Input};
use crate::render::{render, SUGGESTIONS};
use crate::viewmodel::{auth, cart, search::spawn_search, AuthMode, SearchOutcome, ViewModel, ViewState};

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, R: DocumentRepository, B: GenerativeBackend> {
    accounts: &'a AccountStore<R>,
    dispatcher: Option<Arc<Dispatcher<B>>>,
    favicon_size: u32,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    pub vm: ViewModel,
}

impl<'a, R, B> Shell<'a, R, B>
where
    R: DocumentRepository,
    B: GenerativeBackend + 'static,
{
    /// Create the shell and the channel search outcomes arrive on
    pub fn new(
        accounts: &'a AccountStore<R>,
        dispatcher: Option<Arc<Dispatcher<B>>>,
        favicon_size: u32,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut vm = ViewModel::new();
        auth::restore_session(&mut vm, accounts);

        let shell = Self {
            accounts,
            dispatcher,
            favicon_size,
            tx,
            vm,
        };
        (shell, rx)
    }

    /// Run until `quit` or end of input
    pub async fn run<I>(
        &mut self,
        input: I,
        mut outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    ) -> std::io::Result<()>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.draw();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        break;
                    };
                    match commands::parse(&line) {
                        Ok(None) => {}
                        Ok(Some(Input::Command(Command::Help))) => {
                            println!("{}", commands::help())
                        }
                        Ok(Some(input)) => {
                            if self.handle(input) == Flow::Quit {
                                break;
                            }
                            self.draw();
                        }
                        Err(message) => println!("{}", message),
                    }
                }
                Some(outcome) = outcomes.recv() => {
                    if self.vm.apply_outcome(outcome) {
                        self.draw();
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply one line of input to the view model
    pub fn handle(&mut self, input: impl Into<Input>) -> Flow {
        self.vm.notice = None;

        let command = match input.into() {
            Input::Command(command) => command,
            Input::Suggestion(n) => {
                self.suggestion(n);
                return Flow::Continue;
            }
        };

        match command {
            Command::Search { query } => self.search(&query.join(" ")),
            Command::Retry => {
                if let Some(ticket) = self.vm.retry() {
                    spawn_search(self.dispatcher.clone(), ticket, self.tx.clone());
                } else {
                    self.vm.notice = Some("Nothing to retry".into());
                }
            }
            Command::Home => self.vm.reset_home(),
            Command::Save { n } => cart::save_result(&mut self.vm, self.accounts, n),
            Command::Remove { n } => cart::remove_item(&mut self.vm, self.accounts, n),
            Command::Cart => {
                if self.vm.is_logged_in() {
                    self.vm.open_cart();
                } else {
                    auth::open(&mut self.vm, AuthMode::Login);
                }
            }
            Command::Close => self.vm.close_overlays(),
            Command::Login { username, password } => {
                auth::login(&mut self.vm, self.accounts, &username, &password);
            }
            Command::Signup {
                username,
                password,
                name,
            } => {
                auth::signup(&mut self.vm, self.accounts, &username, &password, &name.join(" "));
            }
            Command::Logout => auth::logout(&mut self.vm, self.accounts),
            Command::Help => {}
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn suggestion(&mut self, n: usize) {
        if self.vm.view != ViewState::Home {
            self.vm.notice = Some("Suggestions are on the home screen. Type home.".into());
            return;
        }
        match n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)) {
            Some(query) => self.search(query),
            None => self.vm.notice = Some(format!("No suggestion number {}", n)),
        }
    }

    fn search(&mut self, query: &str) {
        if let Some(ticket) = self.vm.begin_search(query) {
            spawn_search(self.dispatcher.clone(), ticket, self.tx.clone());
        }
    }

    fn draw(&self) {
        println!("{}", render(&self.vm, self.favicon_size));
    }
}
