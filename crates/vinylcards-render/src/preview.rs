//! Single front/back pair for live previews.

use vinylcards_spec::{Entry, RenderMode};

use crate::card::Card;
use crate::layout::LayoutEngine;
use crate::rng::RandomSource;

/// One card's two faces.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPair {
    pub front: Card,
    pub back: Card,
}

impl LayoutEngine<'_> {
    /// Renders one front/back pair.
    ///
    /// Token mode ignores `entry`. Music mode needs an entry and returns
    /// `None` without one. Each call draws fresh groove geometry.
    pub fn render_preview_pair(
        &self,
        entry: Option<&Entry>,
        rng: &mut dyn RandomSource,
    ) -> Option<PreviewPair> {
        let cards = self.cards();
        match self.config().mode {
            RenderMode::Token => Some(PreviewPair {
                front: cards.token_front(&mut *rng),
                back: cards.token_back(&mut *rng),
            }),
            RenderMode::Music => {
                let entry = entry?;
                Some(PreviewPair {
                    front: cards.front(0, entry),
                    back: cards.back(0, entry, rng),
                })
            }
        }
    }
}
