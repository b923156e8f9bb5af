//! Enrichment: resolve an item's references into display strings.
//!
//! Never fails as a whole. Every failed lookup degrades to a sentinel and
//! is logged at `warn`.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::traits::fetcher::{fetch_as, Fetcher};
use crate::types::record::{EnrichedFields, HUMAN, SPECIES_ERROR, UNKNOWN};
use crate::types::resource::{Category, Film, Item, Named};

/// Resolve films, homeworld and species for one item.
///
/// Film lookups run concurrently; homeworld and species follow once all
/// films are in.
pub async fn resolve<F: Fetcher + ?Sized>(
    fetcher: &F,
    item: &Item,
    category: Category,
) -> EnrichedFields {
    let films = resolve_films(fetcher, &item.films).await;
    let homeworld = resolve_homeworld(fetcher, item).await;
    let species = resolve_species(fetcher, item, category).await;

    EnrichedFields {
        films,
        homeworld,
        species,
    }
}

/// Film titles in reference order, [`UNKNOWN`] for each failed lookup.
pub async fn resolve_films<F: Fetcher + ?Sized>(fetcher: &F, urls: &[String]) -> Vec<String> {
    join_all(urls.iter().map(|url| async move {
        match fetch_as::<Film, _>(fetcher, url).await {
            Ok(film) => film.title,
            Err(e) => {
                warn!(url = %url, error = %e, "Film lookup failed");
                UNKNOWN.to_string()
            }
        }
    }))
    .await
}

/// Homeworld name, or [`UNKNOWN`] when absent or unresolvable.
pub async fn resolve_homeworld<F: Fetcher + ?Sized>(fetcher: &F, item: &Item) -> String {
    let Some(url) = item.homeworld_url() else {
        return UNKNOWN.to_string();
    };

    match fetch_as::<Named, _>(fetcher, url).await {
        Ok(planet) => planet.name,
        Err(e) => {
            warn!(url = %url, item = %item.name, error = %e, "Homeworld lookup failed");
            UNKNOWN.to_string()
        }
    }
}

/// Species display string for an item of `category`.
///
/// People resolve only their first species reference and default to
/// [`HUMAN`] without one. A species is its own species. Everything else is
/// [`UNKNOWN`].
pub async fn resolve_species<F: Fetcher + ?Sized>(
    fetcher: &F,
    item: &Item,
    category: Category,
) -> String {
    match category {
        Category::People => {
            let Some(url) = item.species.first() else {
                debug!(item = %item.name, "No species reference, assuming human");
                return HUMAN.to_string();
            };

            match fetch_as::<Named, _>(fetcher, url).await {
                Ok(species) => species.name,
                Err(e) => {
                    warn!(url = %url, item = %item.name, error = %e, "Species lookup failed");
                    SPECIES_ERROR.to_string()
                }
            }
        }
        Category::Species => item.name.clone(),
        Category::Planets | Category::Starships | Category::Vehicles => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use serde_json::json;

    const FILM_1: &str = "https://swapi.dev/api/films/1/";
    const FILM_2: &str = "https://swapi.dev/api/films/2/";
    const FILM_3: &str = "https://swapi.dev/api/films/3/";
    const TATOOINE: &str = "https://swapi.dev/api/planets/1/";
    const HUMAN_URL: &str = "https://swapi.dev/api/species/1/";
    const DROID_URL: &str = "https://swapi.dev/api/species/2/";

    fn films_mock() -> MockFetcher {
        MockFetcher::new()
            .with_json(FILM_1, json!({ "title": "A New Hope" }))
            .with_json(FILM_3, json!({ "title": "Return of the Jedi" }))
            .with_status(FILM_2, 500)
    }

    fn person(species: &[&str]) -> Item {
        Item {
            name: "Luke Skywalker".into(),
            films: vec![FILM_1.into(), FILM_2.into(), FILM_3.into()],
            homeworld: Some(TATOOINE.into()),
            species: species.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_failed_film_is_unknown_and_order_kept() {
        let mock = films_mock();
        let titles = resolve_films(&mock, &person(&[]).films).await;
        assert_eq!(titles, vec!["A New Hope", UNKNOWN, "Return of the Jedi"]);
    }

    #[tokio::test]
    async fn test_films_are_fetched_concurrently() {
        let delay = std::time::Duration::from_millis(200);
        let mock = MockFetcher::new()
            .with_json(FILM_1, json!({ "title": "A" }))
            .with_json(FILM_2, json!({ "title": "B" }))
            .with_json(FILM_3, json!({ "title": "C" }))
            .with_delay(FILM_1, delay)
            .with_delay(FILM_2, delay)
            .with_delay(FILM_3, delay);

        let start = std::time::Instant::now();
        let titles = resolve_films(&mock, &person(&[]).films).await;
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(start.elapsed() < delay * 3, "Films fetched sequentially: {:?}", start.elapsed());
    }

    #[tokio::test]
    async fn test_homeworld_resolution() {
        let mock = MockFetcher::new().with_json(TATOOINE, json!({ "name": "Tatooine" }));
        assert_eq!(resolve_homeworld(&mock, &person(&[])).await, "Tatooine");

        let broken = MockFetcher::new().with_json(TATOOINE, json!({ "climate": "arid" }));
        assert_eq!(resolve_homeworld(&broken, &person(&[])).await, UNKNOWN);

        let absent = Item {
            name: "X-wing".into(),
            ..Default::default()
        };
        assert_eq!(resolve_homeworld(&broken, &absent).await, UNKNOWN);
    }

    #[tokio::test]
    async fn test_person_species() {
        let mock = MockFetcher::new()
            .with_json(HUMAN_URL, json!({ "name": "Human" }))
            .with_json(DROID_URL, json!({ "name": "Droid" }));

        assert_eq!(resolve_species(&mock, &person(&[]), Category::People).await, HUMAN);
        assert_eq!(
            resolve_species(&mock, &person(&[DROID_URL, HUMAN_URL]), Category::People).await,
            "Droid"
        );
        // Only the first reference is ever fetched
        assert_eq!(mock.calls_to(HUMAN_URL), 0);
    }

    #[tokio::test]
    async fn test_person_species_failure_sentinel() {
        let mock = MockFetcher::new().with_status(DROID_URL, 404);
        assert_eq!(
            resolve_species(&mock, &person(&[DROID_URL]), Category::People).await,
            SPECIES_ERROR
        );
    }

    #[tokio::test]
    async fn test_species_of_other_categories() {
        let mock = MockFetcher::new();
        let wookiee = Item {
            name: "Wookiee".into(),
            ..Default::default()
        };
        assert_eq!(resolve_species(&mock, &wookiee, Category::Species).await, "Wookiee");
        assert_eq!(resolve_species(&mock, &wookiee, Category::Starships).await, UNKNOWN);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_never_fails() {
        // Nothing registered: every lookup 404s
        let mock = MockFetcher::new();
        let fields = resolve(&mock, &person(&[HUMAN_URL]), Category::People).await;

        assert_eq!(fields.films, vec![UNKNOWN, UNKNOWN, UNKNOWN]);
        assert_eq!(fields.homeworld, UNKNOWN);
        assert_eq!(fields.species, SPECIES_ERROR);
    }
}
