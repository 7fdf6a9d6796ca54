//! Grid layout and pagination.
//!
//! Entries are tiled onto pages in chunks of one page's worth. Every chunk
//! yields a front page in natural order followed by a back page whose rows are
//! mirrored, so that flipping the printed sheet along its long edge puts each
//! back behind its front.

use vinylcards_spec::{Entry, LayoutConfig, PaperSize, RenderMode, MIN_CARD_SIZE_MM};

use crate::card::{Card, CardBuilder, CardMetrics};
use crate::metrics::{default_measure, TextMeasure};
use crate::rng::RandomSource;

/// Cards per row and column for one paper and card size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub per_page: usize,
}

impl Grid {
    /// Fits as many whole cards as possible into the printable area.
    ///
    /// Cards smaller than [`MIN_CARD_SIZE_MM`] give an empty grid.
    pub fn compute(paper: PaperSize, card_size_mm: f64) -> Self {
        if card_size_mm.is_nan() || card_size_mm < MIN_CARD_SIZE_MM {
            return Self {
                columns: 0,
                rows: 0,
                per_page: 0,
            };
        }
        let (width, height) = paper.printable_mm();
        let columns = (width / card_size_mm).floor() as usize;
        let rows = (height / card_size_mm).floor() as usize;
        Self {
            columns,
            rows,
            per_page: columns * rows,
        }
    }

    /// No card fits on the page.
    pub fn is_degenerate(&self) -> bool {
        self.columns < 1 || self.per_page == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Front,
    Back,
}

/// One printed sheet side.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    pub paper: PaperSize,
    pub grid: Grid,
    pub card_size_mm: f64,
    /// Row-major slots; `None` is an empty position.
    pub slots: Vec<Option<Card>>,
}

impl Page {
    /// The card at (`row`, `column`), if that slot is occupied.
    pub fn card_at(&self, row: usize, column: usize) -> Option<&Card> {
        if column >= self.grid.columns {
            return None;
        }
        self.slots
            .get(row * self.grid.columns + column)
            .and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().flatten()
    }

    pub fn card_metrics(&self) -> CardMetrics {
        CardMetrics::from_mm(self.card_size_mm)
    }
}

/// Reorders a page's worth of items for its back side.
///
/// Each row of `columns` items is reversed. A short final row is padded with
/// empty positions on the left, so the item at (r, c) always lands at
/// (r, columns - 1 - c).
pub fn mirror_rows<T>(items: &[T], columns: usize) -> Vec<Option<&T>> {
    if columns == 0 {
        return Vec::new();
    }
    let mut mirrored = Vec::with_capacity(items.len().div_ceil(columns) * columns);
    for row in items.chunks(columns) {
        mirrored.extend(std::iter::repeat(None).take(columns - row.len()));
        mirrored.extend(row.iter().rev().map(Some));
    }
    mirrored
}

/// Caps entries to one page's worth, for on-screen grid views.
pub fn truncate_for_screen(entries: &[Entry], grid: Grid) -> &[Entry] {
    &entries[..entries.len().min(grid.per_page)]
}

/// Lays out card pages for one configuration.
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
    grid: Grid,
}

impl<'a> LayoutEngine<'a> {
    /// An engine measuring with the bundled sans-serif font.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self::with_measure(config, default_measure())
    }

    pub fn with_measure(config: &'a LayoutConfig, measure: &'a dyn TextMeasure) -> Self {
        Self {
            config,
            measure,
            grid: Grid::compute(config.paper, config.card_size_mm),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn cards(&self) -> CardBuilder<'a> {
        CardBuilder::new(self.config, self.measure)
    }

    /// The entries a music layout processes: all of them when printing,
    /// otherwise one page's worth.
    pub fn entries_for_layout<'e>(&self, entries: &'e [Entry]) -> &'e [Entry] {
        if self.config.printing {
            entries
        } else {
            truncate_for_screen(entries, self.grid)
        }
    }

    pub(crate) fn page(&self, kind: PageKind, slots: Vec<Option<Card>>) -> Page {
        Page {
            kind,
            paper: self.config.paper,
            grid: self.grid,
            card_size_mm: self.config.card_size_mm,
            slots,
        }
    }

    /// Builds the back page for a chunk whose first entry has index `offset`.
    pub(crate) fn back_page(
        &self,
        chunk: &[Entry],
        offset: usize,
        rng: &mut dyn RandomSource,
    ) -> Page {
        let cards = self.cards();
        let indexed: Vec<(usize, &Entry)> = chunk
            .iter()
            .enumerate()
            .map(|(i, e)| (offset + i, e))
            .collect();
        let mirrored = mirror_rows(&indexed, self.grid.columns);
        let mut slots = Vec::with_capacity(mirrored.len());
        for slot in mirrored {
            slots.push(slot.map(|&(index, entry)| cards.back(index, entry, &mut *rng)));
        }
        self.page(PageKind::Back, slots)
    }

    /// Lays out all pages.
    ///
    /// Returns nothing when no card fits the paper, or in music mode when
    /// there are no entries. Token mode ignores `entries` and always yields
    /// one full front page and one full back page.
    pub fn layout_pages(&self, entries: &[Entry], rng: &mut dyn RandomSource) -> Vec<Page> {
        if self.grid.is_degenerate() {
            log::debug!(
                "Card size {}mm does not fit {} paper, no pages",
                self.config.card_size_mm,
                self.config.paper
            );
            return Vec::new();
        }

        match self.config.mode {
            RenderMode::Token => self.layout_token_pages(rng),
            RenderMode::Music => self.layout_music_pages(entries, rng),
        }
    }

    fn layout_token_pages(&self, rng: &mut dyn RandomSource) -> Vec<Page> {
        let cards = self.cards();
        let per_page = self.grid.per_page;
        let mut fronts = Vec::with_capacity(per_page);
        for _ in 0..per_page {
            fronts.push(Some(cards.token_front(&mut *rng)));
        }
        let mut backs = Vec::with_capacity(per_page);
        for _ in 0..per_page {
            backs.push(Some(cards.page_token_back(&mut *rng)));
        }
        let front = self.page(PageKind::Front, fronts);
        let back = self.page(PageKind::Back, backs);
        log::debug!("Laid out token pages with {} cards each", per_page);
        vec![front, back]
    }

    fn layout_music_pages(&self, entries: &[Entry], rng: &mut dyn RandomSource) -> Vec<Page> {
        let entries = self.entries_for_layout(entries);
        if entries.is_empty() {
            return Vec::new();
        }

        let cards = self.cards();
        let per_page = self.grid.per_page;
        let mut pages = Vec::with_capacity(entries.len().div_ceil(per_page) * 2);
        for (chunk_index, chunk) in entries.chunks(per_page).enumerate() {
            let offset = chunk_index * per_page;
            let fronts = chunk
                .iter()
                .enumerate()
                .map(|(i, entry)| Some(cards.front(offset + i, entry)))
                .collect();
            pages.push(self.page(PageKind::Front, fronts));
            pages.push(self.back_page(chunk, offset, rng));
            log::debug!(
                "Laid out page pair {} ({} cards)",
                chunk_index + 1,
                chunk.len()
            );
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;
    use pretty_assertions::assert_eq;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(format!("Artist {}", i), format!("Title {}", i), "2000", format!("q{}", i)))
            .collect()
    }

    #[test]
    fn test_grid_a4_46mm() {
        let grid = Grid::compute(PaperSize::A4, 46.0);
        assert_eq!(
            grid,
            Grid {
                columns: 4,
                rows: 6,
                per_page: 24
            }
        );
    }

    #[test]
    fn test_grid_a3() {
        let grid = Grid::compute(PaperSize::A3, 46.0);
        assert_eq!((grid.columns, grid.rows), (6, 8));
    }

    #[test]
    fn test_grid_degenerate() {
        assert!(Grid::compute(PaperSize::A4, 200.0).is_degenerate());
        assert!(!Grid::compute(PaperSize::A4, 150.0).is_degenerate());
        assert!(Grid::compute(PaperSize::A4, 0.0).is_degenerate());
        assert!(Grid::compute(PaperSize::A4, f64::NAN).is_degenerate());
    }

    #[test]
    fn test_tiny_cards_lay_out_nothing() {
        assert!(Grid::compute(PaperSize::A3, 0.001).is_degenerate());
        assert_eq!(Grid::compute(PaperSize::A4, MIN_CARD_SIZE_MM).per_page, 19 * 27);

        let config = LayoutConfig::new(PaperSize::A3, 1e-6).with_token("TOKEN", "");
        let engine = LayoutEngine::new(&config);
        assert!(engine.layout_pages(&[], &mut DeterministicRng::new(1)).is_empty());
    }

    #[test]
    fn test_mirror_rows_full() {
        let items = [0, 1, 2, 3, 4, 5];
        let mirrored: Vec<Option<i32>> = mirror_rows(&items, 3).into_iter().map(|s| s.copied()).collect();
        assert_eq!(mirrored, vec![Some(2), Some(1), Some(0), Some(5), Some(4), Some(3)]);
    }

    #[test]
    fn test_mirror_rows_pads_short_row() {
        let items = [0, 1, 2, 3, 4];
        let mirrored: Vec<Option<i32>> = mirror_rows(&items, 4).into_iter().map(|s| s.copied()).collect();
        assert_eq!(
            mirrored,
            vec![Some(3), Some(2), Some(1), Some(0), None, None, None, Some(4)]
        );
        assert!(mirror_rows(&items, 0).is_empty());
    }

    #[test]
    fn test_truncate_for_screen() {
        let grid = Grid::compute(PaperSize::A4, 46.0);
        let all = entries(30);
        assert_eq!(truncate_for_screen(&all, grid).len(), 24);
        assert_eq!(truncate_for_screen(&all[..5], grid).len(), 5);
    }

    #[test]
    fn test_screen_layout_caps_to_one_page() {
        let config = LayoutConfig::default().with_printing(false);
        let engine = LayoutEngine::new(&config);
        let pages = engine.layout_pages(&entries(30), &mut DeterministicRng::new(1));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].occupied(), 24);
    }

    #[test]
    fn test_music_without_entries() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config);
        assert!(engine.layout_pages(&[], &mut DeterministicRng::new(1)).is_empty());
    }

    #[test]
    fn test_front_order_and_indices() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config);
        let pages = engine.layout_pages(&entries(30), &mut DeterministicRng::new(1));
        let indices: Vec<usize> = pages[2].cards().filter_map(Card::entry_index).collect();
        assert_eq!(indices, (24..30).collect::<Vec<_>>());
        assert_eq!(pages[2].kind, PageKind::Front);
        assert_eq!(pages[3].kind, PageKind::Back);
        assert_eq!(pages[3].slots.len(), 8);
        assert_eq!(pages[3].occupied(), 6);
    }
}
