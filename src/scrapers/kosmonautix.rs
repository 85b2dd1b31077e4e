//! Article scraper for [kosmonautix.cz](https://kosmonautix.cz), a Czech
//! spaceflight blog.
//!
//! # URL Pattern
//!
//! Listing pages live at `https://kosmonautix.cz/page/{n}` and link each
//! article headline to its full page. Article pages carry the byline in a
//! `div.postdate` element ("12. července 2021 ... autor"), with the body as
//! `<p>` elements inside `div.entry`.
//!
//! # Boilerplate
//!
//! The last paragraphs of an article are often a source list ("Zdroje ...")
//! or a translation credit ("Přeloženo ..."); those are stripped before the
//! record is assembled.

use crate::models::Article;
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Prefix of the paginated listing URLs; the page number is appended.
pub const PAGE_URL_PREFIX: &str = "https://kosmonautix.cz/page/";

/// All selectors are scoped to the article column of the page layout.
const ARTICLE_SCOPE: &str = "div #content div >";

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("{ARTICLE_SCOPE} h2.title > a")).unwrap());
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("{ARTICLE_SCOPE} h2.title")).unwrap());
static AUTHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("{ARTICLE_SCOPE} div.postdate > a.author")).unwrap());
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("{ARTICLE_SCOPE} div.postdate")).unwrap());
static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("{ARTICLE_SCOPE} div.entry p")).unwrap());

/// Matches the leading `D. MONTH YYYY` of a byline, month in Czech genitive.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\.\s*(\p{L}+)\s+(\d{4})").unwrap());

/// Czech genitive month names as they appear in bylines, January first.
const CZECH_MONTHS: [&str; 12] = [
    "ledna",
    "února",
    "března",
    "dubna",
    "května",
    "června",
    "července",
    "srpna",
    "září",
    "října",
    "listopadu",
    "prosince",
];

/// Sequential scraper with a fixed pause between HTTP requests.
pub struct Scraper {
    client: Client,
    pause: Duration,
    start_page: u32,
}

impl Scraper {
    /// Build a scraper with the given user agent, inter-request pause in
    /// seconds, and first listing page to visit.
    pub fn new(user_agent: &str, sleep_secs: u64, start_page: u32) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            pause: Duration::from_secs(sleep_secs),
            start_page,
        })
    }

    /// Walk listing pages and collect up to `article_count` article URLs.
    ///
    /// Pagination stops when the target count is reached, a listing request fails,
    /// or a page yields no links (past the last page the site serves a
    /// page with an empty article column). Duplicate URLs are dropped,
    /// first-seen order preserved.
    #[instrument(level = "info", skip(self))]
    pub async fn index_articles(&self, article_count: usize) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let mut page = self.start_page;

        while urls.len() < article_count {
            let page_url = format!("{PAGE_URL_PREFIX}{page}");
            let links = match self.index_page(&page_url, article_count - urls.len()).await {
                Ok(links) => links,
                Err(e) => {
                    warn!(%page_url, error = %e, "Listing fetch failed; stopping pagination");
                    break;
                }
            };
            if links.is_empty() {
                info!(%page_url, "Listing page yielded no article links; pages exhausted");
                break;
            }
            for link in links {
                if urls.len() == article_count {
                    break;
                }
                if !urls.contains(&link) {
                    urls.push(link);
                }
            }
            page += 1;
            sleep(self.pause).await;
        }

        info!(count = urls.len(), "Indexed article URLs");
        debug!(urls = ?urls, "Article URLs");
        urls
    }

    /// Fetch one listing page and extract up to `maximum` article links.
    async fn index_page(
        &self,
        page_url: &str,
        maximum: usize,
    ) -> Result<Vec<String>, Box<dyn Error>> {
        let html = self
            .client
            .get(page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let links = extract_article_links(&html, page_url, maximum)?;
        info!(count = links.len(), %page_url, "Extracted article links from listing page");
        Ok(links)
    }

    /// Fetch all articles sequentially, pausing between requests.
    ///
    /// Failed fetches are logged and skipped without failing the batch.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_articles(&self, urls: &[String]) -> Vec<Article> {
        let mut articles = Vec::with_capacity(urls.len());
        for url in urls {
            match self.fetch_article(url).await {
                Ok(article) => {
                    debug!(%url, title = ?article.title, "Fetched article");
                    articles.push(article);
                }
                Err(e) => {
                    error!(%url, error = %e, "Article fetch failed; skipping");
                }
            }
            sleep(self.pause).await;
        }
        info!(count = articles.len(), "Fetched article contents");
        articles
    }

    /// Fetch a single article page and parse it into a record.
    #[instrument(level = "debug", skip(self))]
    async fn fetch_article(&self, url: &str) -> Result<Article, Box<dyn Error>> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_article(&html))
    }

    /// Scrape one article by URL, swallowing failures.
    ///
    /// Returns `None` instead of an error when the URL does not respond or
    /// the fetch fails, for callers that only want best-effort extraction.
    pub async fn scrape_article(&self, url: &str) -> Option<Article> {
        match self.fetch_article(url).await {
            Ok(article) => Some(article),
            Err(e) => {
                warn!(%url, error = %e, "Single-article scrape failed");
                None
            }
        }
    }
}

/// Extract up to `maximum` article URLs from a listing page document.
///
/// Relative hrefs resolve against `page_url`; duplicates within the page
/// are dropped.
pub fn extract_article_links(
    html: &str,
    page_url: &str,
    maximum: usize,
) -> Result<Vec<String>, Box<dyn Error>> {
    let base = Url::parse(page_url)?;
    let document = Html::parse_document(html);
    let links = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .unique()
        .filter_map(|href| base.join(href).ok())
        .map(|resolved| resolved.to_string())
        .take(maximum)
        .collect();
    Ok(links)
}

/// Parse an article page into a record. Missing nodes yield `None` fields.
pub fn parse_article(html: &str) -> Article {
    let document = Html::parse_document(html);
    let date = select_text(&document, &DATE_SELECTOR).and_then(|raw| {
        let parsed = parse_czech_date(&raw);
        if parsed.is_none() {
            warn!(byline = %truncate_for_log(&raw, 80), "Could not parse byline date");
        }
        parsed
    });
    Article {
        title: select_text(&document, &TITLE_SELECTOR),
        author: select_text(&document, &AUTHOR_SELECTOR),
        date,
        content_paragraphs: extract_paragraphs(&document),
    }
}

/// Trimmed text of the first node matching `selector`, if any.
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    let text = document
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Parse a byline date such as "12. července 2021".
///
/// The month is matched against an explicit Czech month table so parsing
/// does not depend on a system locale being installed.
pub fn parse_czech_date(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month_name = caps[2].to_lowercase();
    let month = CZECH_MONTHS.iter().position(|m| *m == month_name)? as u32 + 1;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Collect body paragraphs and strip trailing boilerplate.
///
/// Up to the last 3 paragraphs are inspected; each one starting with
/// "zdroje" or "přeloženo" (case-insensitive) counts as boilerplate, and
/// that many paragraphs are cut from the end. Empty paragraphs are dropped.
fn extract_paragraphs(document: &Html) -> Option<Vec<String>> {
    let mut paragraphs: Vec<String> = document
        .select(&CONTENT_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();

    let mut cut = 0;
    for i in 1..=3 {
        if paragraphs.len() < i {
            break;
        }
        let lower = paragraphs[paragraphs.len() - i].to_lowercase();
        if lower.starts_with("zdroje") || lower.starts_with("přeloženo") {
            cut += 1;
        }
    }
    paragraphs.truncate(paragraphs.len() - cut);
    paragraphs.retain(|p| !p.is_empty());

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs)
    }
}
