//! [`IDataSource`] over the web catalog's search, actor, and title pages.

use tracing::debug;

use costar_core::config::CatalogConfig;
use costar_core::errors::{CatalogError, CostarResult};
use costar_core::{ActorRef, IDataSource, MovieRef};
use costar_observability::fetch_span;

use super::client::{HttpClient, HttpClientConfig};
use super::extract::{
    actor_search_strategies, filmography_strategies, first_non_empty, CastExtractor,
    ExtractionStrategy, Page,
};
use crate::normalize::{scraped_cast, scraped_movies};

/// Crawls the catalog page by page. Every call hits the network; wrap it in
/// [`CachedDataSource`](crate::CachedDataSource) for memoization.
pub struct ImdbCatalog {
    client: HttpClient,
    base_url: String,
    max_movies: usize,
    max_cast: usize,
    search: Vec<Box<dyn ExtractionStrategy<ActorRef>>>,
    filmography: Vec<Box<dyn ExtractionStrategy<MovieRef>>>,
    cast: CastExtractor,
}

impl ImdbCatalog {
    pub fn new(config: &CatalogConfig) -> CostarResult<Self> {
        let client = HttpClient::new(HttpClientConfig::from_catalog(config))?;
        Ok(Self {
            client,
            base_url: config.effective_base_url(),
            max_movies: config.effective_max_movies(),
            max_cast: config.effective_max_cast(),
            search: actor_search_strategies(),
            filmography: filmography_strategies(),
            cast: CastExtractor::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn search_url(&self, name: &str) -> Result<String, CatalogError> {
        let endpoint = format!("{}/find/", self.base_url);
        reqwest::Url::parse_with_params(&endpoint, &[("q", name), ("ref_", "nv_sr_sm")])
            .map(String::from)
            .map_err(|e| CatalogError::Parse {
                url: endpoint,
                what: format!("search url ({e})"),
            })
    }

    pub(crate) fn actor_url(&self, actor: &ActorRef) -> String {
        format!("{}/name/{}/", self.base_url, actor.id)
    }

    pub(crate) fn movie_url(&self, movie: &MovieRef) -> String {
        match &movie.href {
            Some(href) if href.starts_with("http") => href.clone(),
            Some(href) => format!("{}{}", self.base_url, href),
            None => format!("{}/title/{}/", self.base_url, movie.id),
        }
    }

    fn fetch_page(&self, url: &str) -> Result<Page, CatalogError> {
        let html = self.client.get_text(url)?;
        Ok(Page::parse(&self.base_url, &html))
    }
}

impl IDataSource for ImdbCatalog {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        let _span = fetch_span!("search", name).entered();
        let url = self.search_url(name.trim())?;
        let page = self.fetch_page(&url)?;
        let (found, strategy) = first_non_empty(&self.search, &page);
        let actor = scraped_cast(found, 1).into_iter().next();
        debug!(name, ?strategy, actor_id = actor.as_ref().map(|a| a.id.as_str()), "actor search");
        Ok(actor)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        let _span = fetch_span!("filmography", actor.id).entered();
        let page = self.fetch_page(&self.actor_url(actor))?;
        let (found, strategy) = first_non_empty(&self.filmography, &page);
        let movies = scraped_movies(found, self.max_movies);
        debug!(actor_id = %actor.id, ?strategy, movies = movies.len(), "filmography extracted");
        Ok(movies)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        let _span = fetch_span!("cast", movie.id).entered();
        let page = self.fetch_page(&self.movie_url(movie))?;
        let cast = scraped_cast(self.cast.extract(&page), self.max_cast);
        debug!(movie_id = %movie.id, cast = cast.len(), "cast extracted");
        Ok(cast)
    }

    fn name(&self) -> &str {
        "imdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ImdbCatalog {
        let config = CatalogConfig {
            base_url: Some("https://catalog.test/".into()),
            ..Default::default()
        };
        ImdbCatalog::new(&config).unwrap()
    }

    #[test]
    fn search_url_encodes_the_name() {
        let url = catalog().search_url("Lee Byung-hun & co").unwrap();
        assert_eq!(
            url,
            "https://catalog.test/find/?q=Lee+Byung-hun+%26+co&ref_=nv_sr_sm"
        );
    }

    #[test]
    fn page_urls_follow_ids_and_hrefs() {
        let c = catalog();
        assert_eq!(c.actor_url(&ActorRef::new("nm1", "A")), "https://catalog.test/name/nm1/");
        assert_eq!(
            c.movie_url(&MovieRef::new("tt1", "Heat")),
            "https://catalog.test/title/tt1/"
        );
        assert_eq!(
            c.movie_url(&MovieRef::new("tt1", "Heat").with_href("/title/tt1/?ref_=nm_flmg")),
            "https://catalog.test/title/tt1/?ref_=nm_flmg"
        );
    }
}
