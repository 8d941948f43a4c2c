//! Single-page document extraction.

use lopdf::Document;
use tracing::{debug, trace};

use super::{PageIndex, PdfExtractor, PdfProcessor, Result};
use crate::error::PdfError;

/// Build a standalone PDF holding only the page at `index` of `data`.
///
/// Fails with `PdfError::Parse`/`Encrypted` when `data` is not a usable PDF
/// and with `PdfError::PageOutOfRange` when the index is past the last page.
pub fn split_page(data: &[u8], index: PageIndex) -> Result<Vec<u8>> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.split_page(index)
}

/// Build a standalone PDF holding only the page at `index` of `doc`.
///
/// `doc` is left untouched; the other pages are removed from a copy, then
/// objects no longer reachable from the trailer are pruned.
pub fn split_document_page(doc: &Document, index: PageIndex, strip_outlines: bool) -> Result<Vec<u8>> {
    let pages = doc.get_pages();
    let page_count = pages.len() as u32;
    index.check(page_count)?;

    let keep = pages
        .keys()
        .nth(index.get())
        .copied()
        .ok_or(PdfError::PageOutOfRange {
            index: index.get(),
            page_count,
        })?;
    let others: Vec<u32> = pages.keys().copied().filter(|&n| n != keep).collect();

    let mut single = doc.clone();
    single.delete_pages(&others);

    if strip_outlines {
        if let Ok(catalog) = single.catalog_mut() {
            catalog.remove(b"Outlines");
        }
    }

    let pruned = single.prune_objects();
    trace!("Pruned {} unreachable objects", pruned.len());
    single.renumber_objects();

    let mut out = Vec::new();
    single
        .save_to(&mut out)
        .map_err(|e| PdfError::Save(e.to_string()))?;

    debug!(
        "Split page {} of {} into {} bytes",
        index.page_number(),
        page_count,
        out.len()
    );
    Ok(out)
}
