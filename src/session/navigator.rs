//! Cursor over the visited sequence plus the not-yet-seen stream from the walker.

use anyhow::Result;
use std::collections::HashSet;

use crate::Intent;
use crate::store::LabelStore;

use super::presenter::View;

/// Navigation state: an append-only visited sequence, a cursor into it, and the image stream.
///
/// A cursor at `visited.len()` is "at the frontier": the next [`current`](Self::current) pulls
/// a fresh identifier. Identifiers already in the label store are never pulled again.
pub struct Navigator<I> {
    visited: Vec<String>,
    seen: HashSet<String>,
    cursor: usize,
    images: I,
    exhausted: bool,
}

impl<I> Navigator<I>
where
    I: Iterator<Item = Result<String>>,
{
    /// Start at the frontier of `visited` (the resumed history, in label-file order).
    pub fn new(visited: Vec<String>, images: I) -> Self {
        let mut seen = HashSet::with_capacity(visited.len());
        let visited: Vec<String> = visited
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self {
            cursor: visited.len(),
            visited,
            seen,
            images,
            exhausted: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Resolve what to show at the cursor. At the frontier a fresh image is pulled; once the
    /// walker is exhausted the cursor falls back to the last visited image.
    /// `None` only when there is nothing at all to show.
    pub fn current(&mut self, store: &LabelStore) -> Result<Option<View>> {
        if self.cursor >= self.visited.len() {
            if let Some(identifier) = self.pull_fresh(store)? {
                self.seen.insert(identifier.clone());
                self.visited.push(identifier.clone());
                self.cursor = self.visited.len() - 1;
                return Ok(Some(View {
                    index: self.cursor,
                    identifier,
                    label: None,
                    fresh: true,
                }));
            }
            let Some(last) = self.visited.len().checked_sub(1) else {
                return Ok(None);
            };
            self.cursor = last;
        }
        let identifier = self.visited[self.cursor].clone();
        Ok(Some(View {
            index: self.cursor,
            label: store.get(&identifier),
            identifier,
            fresh: false,
        }))
    }

    /// Move the cursor for `intent`. Label intents advance; Retreat stops at the first image.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::LabelPositive | Intent::LabelNegative | Intent::Advance => self.cursor += 1,
            Intent::Retreat => self.cursor = self.cursor.saturating_sub(1),
            Intent::Quit => {}
        }
    }

    fn pull_fresh(&mut self, store: &LabelStore) -> Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        for item in self.images.by_ref() {
            let identifier = item?;
            if store.contains(&identifier) || self.seen.contains(&identifier) {
                continue;
            }
            return Ok(Some(identifier));
        }
        self.exhausted = true;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn images(ids: &[&str]) -> std::vec::IntoIter<Result<String>> {
        ids.iter()
            .map(|s| Ok(s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn shown<I: Iterator<Item = Result<String>>>(
        nav: &mut Navigator<I>,
        store: &LabelStore,
    ) -> String {
        nav.current(store).unwrap().unwrap().identifier
    }

    #[test]
    fn empty_tree_has_nothing_to_show() {
        let mut nav = Navigator::new(Vec::new(), images(&[]));
        assert_eq!(nav.current(&LabelStore::new()).unwrap(), None);
        assert!(nav.is_exhausted());
    }

    #[test]
    fn labeled_images_are_not_pulled_again() {
        let mut store = LabelStore::new();
        store.set("b.png".into(), Label::Positive);
        let mut nav = Navigator::new(Vec::new(), images(&["a.png", "b.png", "c.png"]));
        assert_eq!(shown(&mut nav, &store), "a.png");
        nav.apply(Intent::Advance);
        assert_eq!(shown(&mut nav, &store), "c.png");
        assert_eq!(nav.visited(), ["a.png", "c.png"]);
    }

    #[test]
    fn retreat_clamps_at_first_image() {
        let store = LabelStore::new();
        let mut nav = Navigator::new(Vec::new(), images(&["a.png", "b.png"]));
        shown(&mut nav, &store);
        nav.apply(Intent::Advance);
        shown(&mut nav, &store);
        for _ in 0..5 {
            nav.apply(Intent::Retreat);
        }
        assert_eq!(nav.cursor(), 0);
        assert_eq!(shown(&mut nav, &store), "a.png");
    }

    #[test]
    fn advance_past_exhausted_frontier_stays_on_last() {
        let store = LabelStore::new();
        let mut nav = Navigator::new(Vec::new(), images(&["a.png", "b.png"]));
        shown(&mut nav, &store);
        nav.apply(Intent::Advance);
        shown(&mut nav, &store);
        for _ in 0..3 {
            nav.apply(Intent::Advance);
            let view = nav.current(&store).unwrap().unwrap();
            assert_eq!(view.identifier, "b.png");
            assert_eq!(view.index, 1);
            assert!(!view.fresh);
        }
        assert_eq!(nav.visited().len(), 2);
    }

    #[test]
    fn resumed_history_is_reviewed_when_walker_is_exhausted() {
        let mut store = LabelStore::new();
        store.set("x.png".into(), Label::Negative);
        store.set("y.png".into(), Label::Positive);
        let mut nav = Navigator::new(store.order().to_vec(), images(&["y.png", "x.png"]));
        let view = nav.current(&store).unwrap().unwrap();
        assert_eq!(view.identifier, "y.png");
        assert_eq!(view.label, Some(Label::Positive));
        nav.apply(Intent::Retreat);
        let view = nav.current(&store).unwrap().unwrap();
        assert_eq!(view.identifier, "x.png");
        assert_eq!(view.label, Some(Label::Negative));
    }

    #[test]
    fn duplicate_history_entries_collapse() {
        let nav = Navigator::new(
            vec!["a.png".into(), "b.png".into(), "a.png".into()],
            images(&[]),
        );
        assert_eq!(nav.visited(), ["a.png", "b.png"]);
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn walk_error_is_not_exhaustion() {
        let items: Vec<Result<String>> = vec![Err(anyhow::anyhow!("permission denied"))];
        let mut nav = Navigator::new(Vec::new(), items.into_iter());
        assert!(nav.current(&LabelStore::new()).is_err());
        assert!(!nav.is_exhausted());
    }
}
