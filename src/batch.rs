//! Bulk batch scheduling
//!
//! Sites are processed in fixed-size groups to bound peak load. Within a
//! group every site runs its whole crawl+extract+aggregate pipeline as
//! its own task under an independent deadline; a timeout or panic on one
//! site contributes nothing and never blocks its siblings.

use crate::aggregate::SiteAggregator;
use crate::config::Config;
use crate::crawler::SiteCrawler;
use crate::extract::{extract_page, PageExtraction, PhoneNormalizer};
use crate::fetch::{browser_headers, build_http_client, fetch_page, pick_user_agent, FetchedPage};
use crate::record::SiteRecord;
use crate::url::normalize_root_url;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Runs site pipelines over many URLs in bounded groups
pub struct BatchScheduler {
    config: Arc<Config>,
    client: Client,
    normalizer: Arc<PhoneNormalizer>,
}

impl BatchScheduler {
    pub fn new(config: Config) -> crate::Result<Self> {
        let client = build_http_client(config.crawler.request_timeout_secs)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            normalizer: Arc::new(PhoneNormalizer::new()),
        })
    }

    /// Processes all URLs and returns the successful site records
    ///
    /// Failed or timed-out sites are omitted from the output, never
    /// reported as error entries. Output order is not guaranteed to
    /// match input order.
    pub async fn run_all(&self, urls: &[String], crawl_enabled: bool) -> Vec<SiteRecord> {
        let group_size = self.config.batch.group_size;
        let total_groups = urls.len().div_ceil(group_size);
        let deadline = Duration::from_secs(self.config.batch.site_timeout_secs);

        info!(
            "Processing {} sites in {} groups of up to {}",
            urls.len(),
            total_groups,
            group_size
        );

        let mut records = Vec::new();
        for (index, group) in urls.chunks(group_size).enumerate() {
            let mut handles = Vec::with_capacity(group.len());
            for url in group {
                let config = Arc::clone(&self.config);
                let normalizer = Arc::clone(&self.normalizer);
                let client = self.client.clone();
                let url = url.clone();

                handles.push(tokio::spawn(async move {
                    tokio::time::timeout(
                        deadline,
                        process_site(&client, &url, crawl_enabled, &config, &normalizer),
                    )
                    .await
                }));
            }

            for (url, handle) in group.iter().zip(handles) {
                match handle.await {
                    Ok(Ok(Some(record))) => records.push(record),
                    Ok(Ok(None)) => debug!("No content extracted from {}", url),
                    Ok(Err(_)) => warn!("Site timed out: {}", url),
                    Err(e) => warn!("Site task failed for {}: {}", url, e),
                }
            }

            info!("Group {}/{} complete", index + 1, total_groups);

            if index + 1 < total_groups {
                tokio::time::sleep(Duration::from_millis(
                    self.config.batch.pause_between_groups_ms,
                ))
                .await;
            }
        }

        records
    }
}

/// Convenience entry point: build a scheduler and run one batch
pub async fn run_batch(
    config: Config,
    urls: &[String],
    crawl_enabled: bool,
) -> crate::Result<Vec<SiteRecord>> {
    let scheduler = BatchScheduler::new(config)?;
    Ok(scheduler.run_all(urls, crawl_enabled).await)
}

/// One site's full pipeline: discover candidates, fetch and extract each
/// page concurrently, merge in crawl order
///
/// Returns `None` when not a single page yielded content: such a site is
/// omitted from batch output entirely.
async fn process_site(
    client: &Client,
    url: &str,
    crawl_enabled: bool,
    config: &Config,
    normalizer: &Arc<PhoneNormalizer>,
) -> Option<SiteRecord> {
    let user_agent = pick_user_agent(config);
    let headers = browser_headers(&user_agent);
    let semaphore = Arc::new(Semaphore::new(config.crawler.fetch_concurrency));

    let candidates = if crawl_enabled {
        let crawler = SiteCrawler::new(
            client,
            &headers,
            Arc::clone(&semaphore),
            config.crawler.priority_link_cap,
            config.crawler.max_pages,
        );
        crawler.crawl(url).await
    } else {
        match normalize_root_url(url) {
            Ok(root) => vec![root.to_string()],
            Err(e) => {
                debug!("Unusable URL {}: {}", url, e);
                vec![url.to_string()]
            }
        }
    };

    // Fetch and extract all candidate pages concurrently. join_all
    // preserves candidate order, so the aggregator always sees crawl
    // order no matter how the fetches complete.
    let tasks = candidates
        .iter()
        .map(|page_url| fetch_and_extract(client, &headers, &semaphore, page_url, normalizer));
    let extractions = futures::future::join_all(tasks).await;

    // The record is keyed by the normalized root URL, first in the
    // candidate list.
    let root_url = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| url.to_string());

    let mut aggregator = SiteAggregator::new(root_url);
    let mut extracted_any = false;
    for (page_url, extraction) in candidates.iter().zip(extractions) {
        if let Some(extraction) = extraction {
            aggregator.add_page(page_url, &extraction);
            extracted_any = true;
        }
    }

    if extracted_any {
        Some(aggregator.finish())
    } else {
        None
    }
}

/// Fetches one page and runs the extraction pipeline on the blocking pool
///
/// Any failure (fetch error, empty body, extraction panic) degrades to
/// `None`: the page simply contributes nothing.
async fn fetch_and_extract(
    client: &Client,
    headers: &HeaderMap,
    semaphore: &Arc<Semaphore>,
    page_url: &str,
    normalizer: &Arc<PhoneNormalizer>,
) -> Option<PageExtraction> {
    let page = {
        let _permit = semaphore.acquire().await;
        match fetch_page(client, page_url, headers).await {
            Ok(page) if !page.body.is_empty() => page,
            Ok(_) => {
                debug!("Empty body for {}", page_url);
                return None;
            }
            Err(e) => {
                debug!("Fetch failed for {}: {}", page_url, e);
                return None;
            }
        }
    };

    extract_on_blocking_pool(page, Arc::clone(normalizer)).await
}

async fn extract_on_blocking_pool(
    page: FetchedPage,
    normalizer: Arc<PhoneNormalizer>,
) -> Option<PageExtraction> {
    match tokio::task::spawn_blocking(move || extract_page(&page, &normalizer)).await {
        Ok(extraction) => Some(extraction),
        Err(e) => {
            warn!("Extraction failed for a page: {}", e);
            None
        }
    }
}
