// src/crawler.rs - Breadth-first, domain-bounded email crawl
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ContactHuntError, ContactHuntResult};
use crate::extract::extract_emails;
use crate::utils::http::HttpClient;

/// A fetched page: HTTP status plus raw body text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Collaborator that retrieves a single page.
///
/// The crawl only ever talks to the network through this seam, so tests can
/// drive it with canned fixtures.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> ContactHuntResult<FetchedPage>;
}

/// Production fetcher backed by the shared HTTP client.
pub struct HttpPageFetcher {
    client: HttpClient,
}

impl HttpPageFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> ContactHuntResult<FetchedPage> {
        let response = self
            .client
            .get(url.as_str())
            .await
            .map_err(|e| ContactHuntError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ContactHuntError::NetworkError(e.to_string()))?;

        Ok(FetchedPage { status, body })
    }
}

/// Mutable state owned by a single crawl invocation.
struct CrawlState {
    base_host: String,
    visited: HashSet<String>,
    frontier: VecDeque<Url>,
    /// Visited plus everything already queued; guards against duplicate enqueues.
    enqueued: HashSet<String>,
    pages_fetched: usize,
    emails_found: HashSet<String>,
}

impl CrawlState {
    fn new(seed: Url, base_host: String) -> Self {
        let mut enqueued = HashSet::new();
        enqueued.insert(seed.to_string());

        Self {
            base_host,
            visited: HashSet::new(),
            frontier: VecDeque::from([seed]),
            enqueued,
            pages_fetched: 0,
            emails_found: HashSet::new(),
        }
    }
}

/// Drives a breadth-first crawl of a single domain, collecting email addresses.
///
/// One `Crawler` instance must not be used by concurrent crawls of shared state;
/// each crawl invocation owns its state, so the struct itself is reusable.
pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    delay: Duration,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, delay: Duration) -> Self {
        Self { fetcher, delay }
    }

    /// Crawl starting at `seed_url`, never fetching more than `max_pages` pages
    /// and never leaving the seed's host.
    ///
    /// Individual fetch failures are logged and skipped; the accumulated email
    /// set is returned even when every page fails.
    pub async fn crawl(&self, seed_url: &Url, max_pages: usize) -> ContactHuntResult<HashSet<String>> {
        let base_host = seed_url
            .host_str()
            .ok_or_else(|| ContactHuntError::InvalidInput(format!("URL has no host: {}", seed_url)))?
            .to_string();

        let mut state = CrawlState::new(seed_url.clone(), base_host);

        while state.pages_fetched < max_pages {
            let Some(current) = state.frontier.pop_front() else {
                break;
            };

            if !state.visited.insert(current.to_string()) {
                continue;
            }
            state.pages_fetched += 1;

            info!("Crawling page {}/{}: {}", state.pages_fetched, max_pages, current);

            let page = match self.fetcher.fetch(&current).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Failed to fetch {}: {}", current, e);
                    continue;
                }
            };

            if !page.is_success() {
                warn!("Skipping {}: status {}", current, page.status);
                continue;
            }

            let found = extract_emails(&page.body);
            if !found.is_empty() {
                debug!("Found {} email(s) on {}", found.len(), current);
            }
            state.emails_found.extend(found);

            if state.pages_fetched < max_pages {
                self.enqueue_links(&mut state, &current, &page.body);
            }

            if !state.frontier.is_empty() && state.pages_fetched < max_pages {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            "Crawl finished: {} email(s) across {} page(s)",
            state.emails_found.len(),
            state.pages_fetched
        );
        Ok(state.emails_found)
    }

    /// Resolve outbound links against the current URL and append same-host,
    /// previously unseen ones to the back of the frontier (preserving BFS order).
    fn enqueue_links(&self, state: &mut CrawlState, current: &Url, body: &str) {
        for link in extract_links(body, current) {
            if link.host_str() != Some(state.base_host.as_str()) {
                continue;
            }
            if state.enqueued.insert(link.to_string()) {
                state.frontier.push_back(link);
            }
        }
    }
}

/// Pull anchor targets out of HTML and resolve them against the page URL.
///
/// Absolute, root-relative and relative forms all resolve through `Url::join`;
/// fragments are dropped so `#section` anchors do not look like new pages.
fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let anchor_selector = Selector::parse("a[href]").expect("anchor selector is valid");

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match page_url.join(href) {
            Ok(mut resolved) => {
                resolved.set_fragment(None);
                links.push(resolved);
            }
            Err(e) => {
                debug!("Ignoring unresolvable link {:?} on {}: {}", href, page_url, e);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned-page fetcher recording every URL it is asked for.
    struct StubFetcher {
        pages: HashMap<String, FetchedPage>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(&str, u16, &str)>) -> Self {
            let pages = pages
                .into_iter()
                .map(|(url, status, body)| {
                    (
                        url.to_string(),
                        FetchedPage {
                            status,
                            body: body.to_string(),
                        },
                    )
                })
                .collect();

            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &Url) -> ContactHuntResult<FetchedPage> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| ContactHuntError::NetworkError(format!("no fixture for {}", url)))
        }
    }

    fn crawler(fetcher: StubFetcher) -> Crawler<StubFetcher> {
        Crawler::new(fetcher, Duration::ZERO)
    }

    fn seed() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[tokio::test]
    async fn two_page_fixture_unions_emails_within_budget() {
        let fetcher = StubFetcher::new(vec![
            (
                "https://example.com/",
                200,
                r#"<a href="/team">Team</a> Contact: info@example.com"#,
            ),
            (
                "https://example.com/team",
                200,
                r#"Reach jane@example.com for details"#,
            ),
        ]);

        let emails = crawler(fetcher).crawl(&seed(), 2).await.unwrap();
        assert!(emails.contains("info@example.com"));
        assert!(emails.contains("jane@example.com"));
        assert_eq!(emails.len(), 2);
    }

    #[tokio::test]
    async fn page_budget_of_one_stops_after_the_seed() {
        let fetcher = StubFetcher::new(vec![
            (
                "https://example.com/",
                200,
                r#"<a href="/team">Team</a> Contact: info@example.com"#,
            ),
            (
                "https://example.com/team",
                200,
                r#"Reach jane@example.com"#,
            ),
        ]);

        let crawler = crawler(fetcher);
        let emails = crawler.crawl(&seed(), 1).await.unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails.contains("info@example.com"));
        assert_eq!(crawler.fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn never_refetches_a_visited_url() {
        // Both pages link back to each other and to themselves.
        let fetcher = StubFetcher::new(vec![
            (
                "https://example.com/",
                200,
                r#"<a href="/">Home</a><a href="/a">A</a>"#,
            ),
            (
                "https://example.com/a",
                200,
                r#"<a href="/">Home</a><a href="/a">A</a>"#,
            ),
        ]);

        let crawler = crawler(fetcher);
        crawler.crawl(&seed(), 10).await.unwrap();

        let requests = crawler.fetcher.requests();
        assert_eq!(requests.len(), 2);
        let unique: HashSet<&String> = requests.iter().collect();
        assert_eq!(unique.len(), requests.len());
    }

    #[tokio::test]
    async fn offsite_links_stay_out_of_the_frontier() {
        let fetcher = StubFetcher::new(vec![(
            "https://example.com/",
            200,
            r#"<a href="https://other.com/page">other</a><a href="/local">local</a>"#,
        )]);

        let crawler = crawler(fetcher);
        crawler.crawl(&seed(), 5).await.unwrap();

        for request in crawler.fetcher.requests() {
            assert!(request.starts_with("https://example.com"));
        }
    }

    #[tokio::test]
    async fn fetch_failures_do_not_abort_the_crawl() {
        let fetcher = StubFetcher::new(vec![
            (
                "https://example.com/",
                200,
                r#"<a href="/missing">missing</a><a href="/ok">ok</a>"#,
            ),
            ("https://example.com/ok", 200, "late@example.com"),
        ]);

        let emails = crawler(fetcher).crawl(&seed(), 5).await.unwrap();
        assert!(emails.contains("late@example.com"));
    }

    #[tokio::test]
    async fn all_failures_still_return_an_empty_set() {
        let fetcher = StubFetcher::new(vec![]);
        let emails = crawler(fetcher).crawl(&seed(), 3).await.unwrap();
        assert!(emails.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_skipped() {
        let fetcher = StubFetcher::new(vec![(
            "https://example.com/",
            404,
            "ghost@example.com",
        )]);

        let emails = crawler(fetcher).crawl(&seed(), 2).await.unwrap();
        assert!(emails.is_empty());
    }

    #[test]
    fn relative_and_root_relative_links_resolve() {
        let page = Url::parse("https://example.com/blog/post").unwrap();
        let html = r#"
            <a href="next">next</a>
            <a href="/about">about</a>
            <a href="https://example.com/contact#form">contact</a>
        "#;

        let links = extract_links(html, &page);
        let as_strings: Vec<String> = links.iter().map(|u| u.to_string()).collect();
        assert!(as_strings.contains(&"https://example.com/blog/next".to_string()));
        assert!(as_strings.contains(&"https://example.com/about".to_string()));
        // Fragment dropped.
        assert!(as_strings.contains(&"https://example.com/contact".to_string()));
    }
}
