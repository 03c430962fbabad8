use serde::Deserialize;

use super::deserializers::deserialize_lenient_page;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_lenient_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// 1-based page slice of an ordered selection. Pages past the end yield an
/// empty slice; callers decide whether that means not-found.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let page = page.max(1);
    // page numbers come straight from the client; an overflowing offset is
    // just a page past the end
    let Some(start) = (page - 1).checked_mul(QUESTIONS_PER_PAGE) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
