//! Regex-based extraction of actors and movies from catalog pages.
//!
//! A page is scanned once into [`Anchor`]s; strategies then pick the anchors
//! they understand. Catalog markup drifts over time, so each lookup tries an
//! ordered list of strategies and keeps the first non-empty result.

use std::sync::LazyLock;

use regex::Regex;

use costar_core::{ActorRef, MovieRef};

/// Class carried by result and filmography entries on catalog list pages.
pub const SUMMARY_ITEM_CLASS: &str = "ipc-metadata-list-summary-item__t";

/// Below this many cast anchors, image captions are scanned too.
pub const MIN_CAST_BEFORE_SUPPLEMENT: usize = 5;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("static regex"));

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("static regex")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("static regex")
});

static IMG_ALT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<img\b[^>]*\balt\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("static regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

/// Canonical actor page path.
static NAME_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/name/(nm\d+)/").expect("static regex"));

/// Canonical title page path.
static TITLE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/(tt\d+)/").expect("static regex"));

/// One `<a>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub class: String,
    /// Visible text with tags stripped, entities decoded, whitespace collapsed.
    pub text: String,
    /// `alt` of the first nested image.
    pub img_alt: Option<String>,
}

impl Anchor {
    fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// Path segment following `/{kind}/` in the href.
    fn segment_after(&self, kind: &str) -> Option<&str> {
        let marker = format!("/{kind}/");
        let start = self.href.find(&marker)? + marker.len();
        let rest = &self.href[start..];
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let segment = &rest[..end];
        (!segment.is_empty()).then_some(segment)
    }
}

/// A fetched page reduced to its anchors, with the base for absolute links.
#[derive(Debug, Clone)]
pub struct Page {
    pub base_url: String,
    pub anchors: Vec<Anchor>,
}

impl Page {
    pub fn parse(base_url: &str, html: &str) -> Self {
        let anchors = ANCHOR_RE
            .captures_iter(html)
            .map(|caps| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                let inner = caps.get(2).map_or("", |m| m.as_str());
                Anchor {
                    href: first_group(&HREF_RE, attrs).map(decode_entities).unwrap_or_default(),
                    class: first_group(&CLASS_RE, attrs).unwrap_or_default().to_string(),
                    text: visible_text(inner),
                    img_alt: first_group(&IMG_ALT_RE, inner).map(|alt| decode_entities(alt).trim().to_string()),
                }
            })
            .collect();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anchors,
        }
    }

    fn absolute(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            format!("{}/{}", self.base_url, href)
        }
    }
}

fn first_group<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    let caps = re.captures(haystack)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn visible_text(inner: &str) -> String {
    let stripped = TAG_RE.replace_all(inner, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the handful of entities that show up in names and titles.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// One way of reading a page.
pub trait ExtractionStrategy<T>: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, page: &Page) -> Vec<T>;
}

/// Run strategies in order; the first non-empty result wins.
pub fn first_non_empty<T>(strategies: &[Box<dyn ExtractionStrategy<T>>], page: &Page) -> (Vec<T>, Option<&'static str>) {
    for strategy in strategies {
        let found = strategy.extract(page);
        if !found.is_empty() {
            return (found, Some(strategy.name()));
        }
    }
    (Vec::new(), None)
}

// ── actor search ────────────────────────────────────────────────────────────

/// Result-list entries linking to an actor page.
pub struct SummaryItemActors;

impl ExtractionStrategy<ActorRef> for SummaryItemActors {
    fn name(&self) -> &'static str {
        "summary-item-actors"
    }

    fn extract(&self, page: &Page) -> Vec<ActorRef> {
        page.anchors
            .iter()
            .filter(|a| a.has_class(SUMMARY_ITEM_CLASS))
            .filter_map(|a| Some(ActorRef::new(a.segment_after("name")?, a.text.clone())))
            .collect()
    }
}

/// Any anchor to an `nm` actor page.
pub struct AnyActorLink;

impl ExtractionStrategy<ActorRef> for AnyActorLink {
    fn name(&self) -> &'static str {
        "any-actor-link"
    }

    fn extract(&self, page: &Page) -> Vec<ActorRef> {
        page.anchors
            .iter()
            .filter_map(|a| {
                let id = NAME_PATH_RE.captures(&a.href)?.get(1)?.as_str();
                let name = if a.text.is_empty() { a.img_alt.clone()? } else { a.text.clone() };
                Some(ActorRef::new(id, name))
            })
            .collect()
    }
}

pub fn actor_search_strategies() -> Vec<Box<dyn ExtractionStrategy<ActorRef>>> {
    vec![Box::new(SummaryItemActors), Box::new(AnyActorLink)]
}

// ── filmography ─────────────────────────────────────────────────────────────

/// Filmography list entries linking to a title page.
pub struct SummaryItemTitles;

impl ExtractionStrategy<MovieRef> for SummaryItemTitles {
    fn name(&self) -> &'static str {
        "summary-item-titles"
    }

    fn extract(&self, page: &Page) -> Vec<MovieRef> {
        page.anchors
            .iter()
            .filter(|a| a.has_class(SUMMARY_ITEM_CLASS) && !a.text.is_empty())
            .filter_map(|a| {
                let id = a.segment_after("title")?;
                Some(MovieRef::new(id, a.text.clone()).with_href(page.absolute(&a.href)))
            })
            .collect()
    }
}

/// Anchors whose href is a canonical `/title/tt…/` path.
pub struct CanonicalTitleLinks;

impl ExtractionStrategy<MovieRef> for CanonicalTitleLinks {
    fn name(&self) -> &'static str {
        "canonical-title-links"
    }

    fn extract(&self, page: &Page) -> Vec<MovieRef> {
        page.anchors
            .iter()
            .filter(|a| a.text.chars().count() > 1)
            .filter_map(|a| {
                let id = TITLE_PATH_RE.captures(&a.href)?.get(1)?.as_str();
                Some(MovieRef::new(id, a.text.clone()).with_href(page.absolute(&a.href)))
            })
            .collect()
    }
}

/// Any anchor mentioning `/title/tt`, minus numeric link text.
pub struct AnyTitleLink;

impl ExtractionStrategy<MovieRef> for AnyTitleLink {
    fn name(&self) -> &'static str {
        "any-title-link"
    }

    fn extract(&self, page: &Page) -> Vec<MovieRef> {
        page.anchors
            .iter()
            .filter(|a| a.href.contains("/title/tt"))
            .filter(|a| a.text.chars().count() > 1 && !a.text.chars().all(|c| c.is_ascii_digit()))
            .filter_map(|a| {
                let id = a.segment_after("title")?;
                Some(MovieRef::new(id, a.text.clone()).with_href(page.absolute(&a.href)))
            })
            .collect()
    }
}

pub fn filmography_strategies() -> Vec<Box<dyn ExtractionStrategy<MovieRef>>> {
    vec![
        Box::new(SummaryItemTitles),
        Box::new(CanonicalTitleLinks),
        Box::new(AnyTitleLink),
    ]
}

// ── cast ────────────────────────────────────────────────────────────────────

/// Actor anchors on a title page, named by link text or headshot `alt`.
pub struct CastLinks;

impl ExtractionStrategy<ActorRef> for CastLinks {
    fn name(&self) -> &'static str {
        "cast-links"
    }

    fn extract(&self, page: &Page) -> Vec<ActorRef> {
        page.anchors
            .iter()
            .filter_map(|a| {
                let id = NAME_PATH_RE.captures(&a.href)?.get(1)?.as_str();
                let name = if a.text.is_empty() { a.img_alt.clone()? } else { a.text.clone() };
                (name.chars().count() > 1).then(|| ActorRef::new(id, name))
            })
            .collect()
    }
}

/// Headshot captions inside actor anchors. Poster images share the markup.
pub struct CastImageCaptions;

impl ExtractionStrategy<ActorRef> for CastImageCaptions {
    fn name(&self) -> &'static str {
        "cast-image-captions"
    }

    fn extract(&self, page: &Page) -> Vec<ActorRef> {
        page.anchors
            .iter()
            .filter(|a| a.href.contains("/name/nm"))
            .filter_map(|a| {
                let alt = a.img_alt.as_deref()?;
                if alt.chars().count() <= 1 || alt.to_lowercase().starts_with("poster") {
                    return None;
                }
                Some(ActorRef::new(a.segment_after("name")?, alt))
            })
            .collect()
    }
}

/// Cast reading: the primary strategy, topped up from image captions when it
/// finds too few names.
pub struct CastExtractor {
    primary: Box<dyn ExtractionStrategy<ActorRef>>,
    supplement: Box<dyn ExtractionStrategy<ActorRef>>,
    min_primary: usize,
}

impl Default for CastExtractor {
    fn default() -> Self {
        Self {
            primary: Box::new(CastLinks),
            supplement: Box::new(CastImageCaptions),
            min_primary: MIN_CAST_BEFORE_SUPPLEMENT,
        }
    }
}

impl CastExtractor {
    /// Raw cast in page order; duplicates are left for normalization.
    pub fn extract(&self, page: &Page) -> Vec<ActorRef> {
        let mut cast = self.primary.extract(page);
        if cast.len() < self.min_primary {
            cast.extend(self.supplement.extract(page));
        }
        cast
    }
}
