//! Cooperative layout with progress reporting.
//!
//! [`layout_pages_with_progress`] produces exactly the pages of
//! [`LayoutEngine::layout_pages`] for the same random sequence, but yields to
//! the async runtime between pages so a host stays responsive on large
//! inputs. Dropping the future abandons the layout; pages are only returned
//! on completion.

use tokio::task;
use vinylcards_spec::{Entry, RenderMode};

use crate::layout::{LayoutEngine, Page, PageKind};
use crate::rng::RandomSource;

/// Token cards built between yields on the front page.
const TOKEN_YIELD_EVERY: usize = 10;

/// Lays out all pages, reporting `(processed, total)` as front cards are built.
///
/// Reports start at `(0, total)` and end at `(total, total)`, where `total` is
/// the number of entries laid out in music mode and one page's worth in token
/// mode. Nothing is reported when no pages are produced.
pub async fn layout_pages_with_progress<F>(
    engine: &LayoutEngine<'_>,
    entries: &[Entry],
    rng: &mut dyn RandomSource,
    mut on_progress: F,
) -> Vec<Page>
where
    F: FnMut(usize, usize),
{
    if engine.grid().is_degenerate() {
        return Vec::new();
    }

    match engine.config().mode {
        RenderMode::Token => token_pages(engine, rng, &mut on_progress).await,
        RenderMode::Music => music_pages(engine, entries, rng, &mut on_progress).await,
    }
}

async fn token_pages(
    engine: &LayoutEngine<'_>,
    rng: &mut dyn RandomSource,
    on_progress: &mut dyn FnMut(usize, usize),
) -> Vec<Page> {
    let cards = engine.cards();
    let total = engine.grid().per_page;
    on_progress(0, total);

    let mut fronts = Vec::with_capacity(total);
    for i in 0..total {
        fronts.push(Some(cards.token_front(&mut *rng)));
        on_progress(i + 1, total);
        if i % TOKEN_YIELD_EVERY == 0 {
            task::yield_now().await;
        }
    }
    let front = engine.page(PageKind::Front, fronts);
    task::yield_now().await;

    let mut backs = Vec::with_capacity(total);
    for _ in 0..total {
        backs.push(Some(cards.page_token_back(&mut *rng)));
    }
    let back = engine.page(PageKind::Back, backs);

    on_progress(total, total);
    vec![front, back]
}

async fn music_pages(
    engine: &LayoutEngine<'_>,
    entries: &[Entry],
    rng: &mut dyn RandomSource,
    on_progress: &mut dyn FnMut(usize, usize),
) -> Vec<Page> {
    let entries = engine.entries_for_layout(entries);
    if entries.is_empty() {
        return Vec::new();
    }

    let cards = engine.cards();
    let per_page = engine.grid().per_page;
    let total = entries.len();
    on_progress(0, total);

    let mut pages = Vec::with_capacity(total.div_ceil(per_page) * 2);
    for (chunk_index, chunk) in entries.chunks(per_page).enumerate() {
        let offset = chunk_index * per_page;
        let mut fronts = Vec::with_capacity(chunk.len());
        for (i, entry) in chunk.iter().enumerate() {
            fronts.push(Some(cards.front(offset + i, entry)));
            on_progress(offset + i + 1, total);
        }
        pages.push(engine.page(PageKind::Front, fronts));
        task::yield_now().await;

        pages.push(engine.back_page(chunk, offset, &mut *rng));
        task::yield_now().await;
        log::debug!("Laid out page pair {} ({} cards)", chunk_index + 1, chunk.len());
    }

    on_progress(total, total);
    pages
}
