//! Labeling session: navigator, durability scheduler and presenter wired into one loop.

pub mod durability;
pub mod keymap;
pub mod navigator;
pub mod presenter;
pub mod terminal;

pub use durability::Durability;
pub use keymap::{KeyMap, parse_key};
pub use navigator::Navigator;
pub use presenter::{Presenter, View};
pub use terminal::TerminalPresenter;

use anyhow::Result;
use log::{debug, info};

use crate::store::LabelStore;
use crate::{Intent, SessionEnd, SessionReport};

/// Single-threaded control loop: resolve → display → wait for intent → apply → maybe flush.
pub struct Session<I> {
    store: LabelStore,
    navigator: Navigator<I>,
    durability: Durability,
}

impl<I> Session<I>
where
    I: Iterator<Item = Result<String>>,
{
    pub fn new(store: LabelStore, navigator: Navigator<I>, durability: Durability) -> Self {
        Self {
            store,
            navigator,
            durability,
        }
    }

    /// Run until Quit (full commit) or until there is nothing to show (no writes).
    /// Any persist failure ends the session with an error; nothing is swallowed.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> Result<SessionReport> {
        let mut assigned = 0_u64;
        loop {
            let Some(view) = self.navigator.current(&self.store)? else {
                info!("No images found, exiting");
                return Ok(self.report(SessionEnd::NoImages, assigned));
            };
            self.durability.tick();
            presenter.display(&view)?;

            let intent = presenter.wait_for_intent()?;
            if intent == Intent::Quit {
                break;
            }
            if let Some(label) = intent.label() {
                self.store.set(view.identifier.clone(), label);
                self.durability.record(&view.identifier, label);
                assigned += 1;
                debug!("Index: {} | New Label: {}", view.index, label);
            }
            self.navigator.apply(intent);

            self.durability.maybe_flush(&self.store)?;
        }

        info!("Updating labels file, do not close the window");
        self.durability.commit(&self.store)?;
        Ok(self.report(SessionEnd::Quit, assigned))
    }

    fn report(&self, end: SessionEnd, assigned: u64) -> SessionReport {
        SessionReport {
            end,
            displayed: self.durability.iteration(),
            assigned,
            flushes: self.durability.flushes(),
            total_labels: self.store.len(),
            recovered: false,
        }
    }
}
