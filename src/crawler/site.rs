//! Per-site priority-page crawler

use crate::crawler::extract_same_domain_links;
use crate::fetch::fetch_page;
use crate::url::{is_priority_page, normalize_link, normalize_root_url};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Discovers the candidate pages to extract from for one site
///
/// The visited set and all discovery state are owned by one `crawl`
/// call; nothing is shared across sites. The semaphore bounds in-flight
/// fetches for the whole site pipeline (discovery and extraction alike).
pub struct SiteCrawler<'a> {
    client: &'a Client,
    headers: &'a HeaderMap,
    semaphore: Arc<Semaphore>,
    /// How many discovered priority links are themselves explored
    priority_link_cap: usize,
    /// Hard ceiling on pages fetched during discovery
    max_pages: usize,
}

impl<'a> SiteCrawler<'a> {
    pub fn new(
        client: &'a Client,
        headers: &'a HeaderMap,
        semaphore: Arc<Semaphore>,
        priority_link_cap: usize,
        max_pages: usize,
    ) -> Self {
        Self {
            client,
            headers,
            semaphore,
            priority_link_cap,
            max_pages,
        }
    }

    /// Crawls one site and returns its candidate pages in a fixed order:
    /// the root URL first, then discovered priority links in discovery
    /// order. This ordering is what the aggregator's first-wins merge
    /// policies key off, so it must not depend on fetch completion order.
    ///
    /// The root URL is always part of the result, even when its fetch
    /// fails (graceful degradation: downstream still gets a best-effort
    /// pass at the site). Individual link-fetch failures are swallowed;
    /// each URL is fetched at most once per crawl.
    pub async fn crawl(&self, root_input: &str) -> Vec<String> {
        let root = match normalize_root_url(root_input) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Unusable root URL {}: {}", root_input, e);
                return vec![root_input.to_string()];
            }
        };
        let root_str = root.to_string();
        let mut candidates = vec![root_str.clone()];

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(normalize_link(&root));

        let root_page = {
            let _permit = self.semaphore.acquire().await;
            match fetch_page(self.client, &root_str, self.headers).await {
                Ok(page) if !page.body.is_empty() => page,
                Ok(_) => {
                    tracing::debug!("Empty body for root {}", root_str);
                    return candidates;
                }
                Err(e) => {
                    tracing::debug!("Root fetch failed for {}: {}", root_str, e);
                    return candidates;
                }
            }
        };

        let priority_links = discover_priority_links(root_page.body, root.clone()).await;
        for link in &priority_links {
            push_unique(&mut candidates, link);
        }

        // Explore a capped few of the priority links one hop deeper,
        // concurrently. Each task returns the priority links it found;
        // merging happens afterwards, in exploration order.
        let mut tasks = Vec::new();
        for link in priority_links.iter().take(self.priority_link_cap) {
            if visited.len() >= self.max_pages {
                break;
            }
            if !visited.insert(link.clone()) {
                continue;
            }
            tasks.push(self.collect_priority_links(link.clone()));
        }

        for found in futures::future::join_all(tasks).await {
            for link in found {
                push_unique(&mut candidates, &link);
            }
        }

        candidates
    }

    /// Fetches one priority page and returns the priority links it holds
    async fn collect_priority_links(&self, url: String) -> Vec<String> {
        let _permit = self.semaphore.acquire().await;

        let page = match fetch_page(self.client, &url, self.headers).await {
            Ok(page) if !page.body.is_empty() => page,
            Ok(_) => return Vec::new(),
            Err(e) => {
                tracing::debug!("Priority page fetch failed for {}: {}", url, e);
                return Vec::new();
            }
        };

        let base = match Url::parse(&url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };

        discover_priority_links(page.body, base).await
    }
}

/// Parses a page body and keeps its same-domain priority links
///
/// HTML parsing and pattern matching are CPU-bound, so they run on the
/// blocking pool instead of stalling in-flight fetches.
async fn discover_priority_links(body: String, base: Url) -> Vec<String> {
    tokio::task::spawn_blocking(move || {
        extract_same_domain_links(&body, &base)
            .into_iter()
            .filter(|link| match Url::parse(link) {
                Ok(u) => is_priority_page(&u),
                Err(_) => false,
            })
            .collect()
    })
    .await
    .unwrap_or_default()
}

fn push_unique(candidates: &mut Vec<String>, link: &str) {
    if !candidates.iter().any(|c| c == link) {
        candidates.push(link.to_string());
    }
}
