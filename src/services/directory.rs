//! Company directory and search
//!
//! In-memory, read-only view over the static company reference list. The
//! list CSV has three positional columns (symbol, name, description) and no
//! header row.

use serde::ser::Serializer;
use serde::Serialize;
use std::path::Path;

use crate::constants::PAGE_WINDOW_RADIUS;
use crate::error::Result;
use crate::models::Company;

/// Static list of companies, filterable by substring
#[derive(Debug, Default)]
pub struct CompanyDirectory {
    companies: Vec<Company>,
}

/// One entry of the ellipsis-compressed page-link row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(n) => serializer.serialize_u64(*n as u64),
            PageLink::Gap => serializer.serialize_str("…"),
        }
    }
}

/// One page of search results plus pagination metadata
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub items: Vec<Company>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub page_links: Vec<PageLink>,
}

impl CompanyDirectory {
    pub fn from_companies(companies: Vec<Company>) -> Self {
        Self { companies }
    }

    /// Load the reference list from a headerless three-column CSV
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut companies = Vec::new();
        for result in reader.records() {
            let record = result?;
            let symbol = record.get(0).unwrap_or("").trim();
            if symbol.is_empty() {
                continue;
            }
            let name = record.get(1).unwrap_or("").trim().to_string();
            let description = record
                .get(2)
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from);

            companies.push(Company {
                symbol: symbol.to_string(),
                name,
                description,
            });
        }

        Ok(Self { companies })
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Case-insensitive substring match on symbol, name, or description.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Company> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.companies.iter().collect();
        }

        self.companies
            .iter()
            .filter(|c| {
                c.symbol.to_lowercase().contains(&query)
                    || c.name.to_lowercase().contains(&query)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Search plus pagination; `page` is 1-based and clamped into range
    pub fn search_page(&self, query: &str, page: usize, page_size: usize) -> SearchPage {
        let matches = self.search(query);
        let total = matches.len();
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let page = page.clamp(1, total_pages.max(1));

        let start = (page - 1) * page_size;
        let items = matches
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        SearchPage {
            items,
            total,
            page,
            page_size,
            total_pages,
            page_links: page_links(total_pages, page, PAGE_WINDOW_RADIUS),
        }
    }
}

/// Ellipsis-compressed page-number row.
///
/// Always includes the first and last page plus every page within `radius`
/// of the current one. A one-page gap is shown as the actual page number; a
/// longer gap collapses into a single `Gap` marker.
pub fn page_links(total_pages: usize, current: usize, radius: usize) -> Vec<PageLink> {
    let mut kept = Vec::new();
    for i in 1..=total_pages {
        let near_current = i >= current.saturating_sub(radius) && i <= current + radius;
        if i == 1 || i == total_pages || near_current {
            kept.push(i);
        }
    }

    let mut links = Vec::new();
    let mut last: Option<usize> = None;
    for i in kept {
        if let Some(l) = last {
            if i - l == 2 {
                links.push(PageLink::Page(l + 1));
            } else if i - l > 2 {
                links.push(PageLink::Gap);
            }
        }
        links.push(PageLink::Page(i));
        last = Some(i);
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directory() -> CompanyDirectory {
        CompanyDirectory::from_companies(vec![
            Company::new("AAPL", "Apple Inc.").with_description("Consumer electronics"),
            Company::new("MSFT", "Microsoft Corporation").with_description("Software"),
            Company::new("GOOG", "Alphabet Inc."),
            Company::new("JFC", "Jollibee Foods Corporation").with_description("Fast food chain"),
            Company::new("BDO", "BDO Unibank"),
        ])
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dir = sample_directory();
        assert_eq!(dir.search("aapl").len(), 1);
        assert_eq!(dir.search("CORPORATION").len(), 2);
    }

    #[test]
    fn test_search_matches_description() {
        let dir = sample_directory();
        let hits = dir.search("fast food");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "JFC");
    }

    #[test]
    fn test_empty_query_matches_all() {
        let dir = sample_directory();
        assert_eq!(dir.search("").len(), 5);
        assert_eq!(dir.search("  ").len(), 5);
    }

    #[test]
    fn test_search_page_slices_and_clamps() {
        let dir = sample_directory();

        let page = dir.search_page("", 1, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);

        let last = dir.search_page("", 3, 2);
        assert_eq!(last.items.len(), 1);

        // Out-of-range page clamps to the last page
        let clamped = dir.search_page("", 99, 2);
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.items.len(), 1);
    }

    #[test]
    fn test_no_matches_yields_empty_page() {
        let dir = sample_directory();
        let page = dir.search_page("zzzz", 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.page_links.is_empty());
    }

    #[test]
    fn test_page_links_collapse_long_gaps() {
        use PageLink::{Gap, Page};

        let links = page_links(10, 5, 2);
        assert_eq!(
            links,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Gap,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_page_links_one_page_gap_shows_the_page() {
        use PageLink::{Gap, Page};

        // Pages kept around current=4: 1,2,3,4,5,6 and last=8; the gap 6..8
        // is exactly one page wide, so 7 is shown instead of an ellipsis.
        let links = page_links(8, 4, 2);
        assert_eq!(
            links,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Page(8)
            ]
        );

        let with_gap = page_links(9, 4, 2);
        assert_eq!(
            with_gap,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Gap,
                Page(9)
            ]
        );
    }

    #[test]
    fn test_page_links_small_totals_have_no_gaps() {
        use PageLink::Page;
        assert_eq!(page_links(1, 1, 2), vec![Page(1)]);
        assert_eq!(
            page_links(3, 2, 2),
            vec![Page(1), Page(2), Page(3)]
        );
    }

    #[test]
    fn test_page_link_serialization() {
        assert_eq!(
            serde_json::to_value(PageLink::Page(4)).unwrap(),
            serde_json::json!(4)
        );
        assert_eq!(
            serde_json::to_value(PageLink::Gap).unwrap(),
            serde_json::json!("…")
        );
    }
}
