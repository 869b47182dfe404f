// AlMumin - Quran Reader Core
// Copyright (C) 2025 AlMumin contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Chapter list: text filter, pagination and the page-number strip

use crate::api::models::Chapter;

/// Chapters per page in the list view
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Neighbours shown on each side of the current page
pub const WIDE_LINK_DELTA: usize = 2;
pub const COMPACT_LINK_DELTA: usize = 1;

/// Keep chapters matching `query`
///
/// Matches on the transliterated name or translated title
/// (case-insensitive), or on the chapter number containing the raw query.
pub fn filter_chapters<'a>(chapters: &'a [Chapter], query: &str) -> Vec<&'a Chapter> {
    let needle = query.to_lowercase();
    chapters
        .iter()
        .filter(|c| {
            c.english_name.to_lowercase().contains(&needle)
                || c.english_name_translation.to_lowercase().contains(&needle)
                || c.number.to_string().contains(query)
        })
        .collect()
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// 1-based page number, after clamping
    pub number: usize,
    pub total_pages: usize,
    /// 1-based index of the first item shown; 0 when empty
    pub start_item: usize,
    /// 1-based index of the last item shown; 0 when empty
    pub end_item: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Slice `items` into page `page` (1-based, clamped into range)
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let number = page.clamp(1, total_pages.max(1));

    if total_items == 0 {
        return Page {
            number,
            total_pages,
            start_item: 0,
            end_item: 0,
            total_items,
            items: Vec::new(),
        };
    }

    let start = (number - 1) * page_size;
    let end = (start + page_size).min(total_items);
    Page {
        number,
        total_pages,
        start_item: start + 1,
        end_item: end,
        total_items,
        items: items[start..end].to_vec(),
    }
}

/// Entry in the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// Skipped pages
    Gap,
}

/// Windowed page strip: first and last page, `current ± delta`, gaps between
///
/// Empty when there is at most one page.
pub fn page_links(current: usize, total: usize, delta: usize) -> Vec<PageLink> {
    if total <= 1 {
        return Vec::new();
    }

    let mut links = vec![PageLink::Page(1)];
    if current.saturating_sub(delta) > 2 {
        links.push(PageLink::Gap);
    }

    let low = current.saturating_sub(delta).max(2);
    let high = (current + delta).min(total - 1);
    links.extend((low..=high).map(PageLink::Page));

    if current + delta < total - 1 {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(total));
    links
}

/// What the list view shows
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterListSnapshot {
    pub query: String,
    /// Chapters matching the query, across all pages
    pub matches: usize,
    pub page: Page<Chapter>,
    pub links: Vec<PageLink>,
}

/// Filterable, paginated chapter list
#[derive(Debug, Clone)]
pub struct ChapterListView {
    chapters: Vec<Chapter>,
    query: String,
    page: usize,
    page_size: usize,
    link_delta: usize,
}

impl ChapterListView {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self::with_page_size(chapters, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(chapters: Vec<Chapter>, page_size: usize) -> Self {
        Self {
            chapters,
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            link_delta: WIDE_LINK_DELTA,
        }
    }

    /// Narrow screens show one neighbour per side instead of two
    pub fn set_compact(&mut self, compact: bool) {
        self.link_delta = if compact { COMPACT_LINK_DELTA } else { WIDE_LINK_DELTA };
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Changing the query returns to page 1
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn goto_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.last_page());
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.goto_page(self.page.saturating_sub(1));
    }

    pub fn snapshot(&self) -> ChapterListSnapshot {
        let matches: Vec<Chapter> = filter_chapters(&self.chapters, &self.query)
            .into_iter()
            .cloned()
            .collect();
        let page = paginate(&matches, self.page, self.page_size);
        let links = page_links(page.number, page.total_pages, self.link_delta);
        ChapterListSnapshot {
            query: self.query.clone(),
            matches: matches.len(),
            page,
            links,
        }
    }

    fn last_page(&self) -> usize {
        let matches = filter_chapters(&self.chapters, &self.query).len();
        total_pages(matches, self.page_size).max(1)
    }
}
