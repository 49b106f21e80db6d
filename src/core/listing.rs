use crate::domain::model::Lead;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 25, 50, 100];
/// Largest page size the listing route accepts.
pub const MAX_PAGE_SIZE: usize = 1000;

const FULL_SEQUENCE_MAX_PAGES: usize = 7;
const PAGE_WINDOW: usize = 2;

/// Case-insensitive substring search over name, position, email, company
/// and location. A blank query keeps everything.
pub fn filter_leads<'a>(leads: &'a [Lead], query: &str) -> Vec<&'a Lead> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return leads.iter().collect();
    }

    leads
        .iter()
        .filter(|lead| {
            [
                &lead.name,
                &lead.position,
                &lead.email,
                &lead.company,
                &lead.location,
            ]
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// 1-based index of the first entry shown, 0 when there is nothing.
    pub start_entry: usize,
    pub end_entry: usize,
    #[serde(skip)]
    pub offset: usize,
}

impl PageWindow {
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = self.offset.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Clamps `page` into range and computes the visible window.
/// `page_size` must be positive; callers validate it first.
pub fn paginate(total_items: usize, page: usize, page_size: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = page.clamp(1, total_pages);
    let offset = (current_page - 1) * page_size;
    let start_entry = if total_items == 0 { 0 } else { offset + 1 };
    let end_entry = start_entry
        .saturating_add(page_size)
        .saturating_sub(1)
        .min(total_items);

    PageWindow {
        current_page,
        total_pages,
        page_size,
        total_items,
        start_entry,
        end_entry,
        offset,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIndicator {
    Page(usize),
    Ellipsis,
}

// Serialized as a bare page number or the string "ellipsis".
impl Serialize for PageIndicator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageIndicator::Page(page) => serializer.serialize_u64(*page as u64),
            PageIndicator::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Page buttons to render: every page up to 7, otherwise first, a window of
/// two around the current page, and last, with ellipses for the gaps.
pub fn page_sequence(current_page: usize, total_pages: usize) -> Vec<PageIndicator> {
    if total_pages <= FULL_SEQUENCE_MAX_PAGES {
        return (1..=total_pages).map(PageIndicator::Page).collect();
    }

    let left = current_page.saturating_sub(PAGE_WINDOW).max(2);
    let right = (current_page + PAGE_WINDOW).min(total_pages - 1);

    let mut sequence = vec![PageIndicator::Page(1)];
    if left > 2 {
        sequence.push(PageIndicator::Ellipsis);
    }
    sequence.extend((left..=right).map(PageIndicator::Page));
    if right < total_pages - 1 {
        sequence.push(PageIndicator::Ellipsis);
    }
    sequence.push(PageIndicator::Page(total_pages));
    sequence
}
