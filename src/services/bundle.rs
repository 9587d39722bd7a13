use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{movie_key, Filmography, MovieBundle, MovieCredits, Person, PersonCredits, Role},
    services::providers::MetadataProvider,
};

/// Crew jobs that count as playable connections. Everyone else on the crew
/// roll is ignored.
pub const CREW_JOB_ALLOWLIST: [&str; 5] = [
    "Director",
    "Writer",
    "Screenplay",
    "Director of Photography",
    "Original Music Composer",
];

/// Assembles complete, cacheable movie bundles: the movie, its relevant
/// people, and each person's filmography.
///
/// `build` is idempotent per board key — a cached complete bundle is served
/// as-is and never re-fetched.
pub struct BundleBuilder {
    provider: Arc<dyn MetadataProvider>,
    cache: Cache,
    /// Caps provider calls per bundle, not ranking quality; people beyond
    /// the cap are invisible to the engine for this movie.
    max_people: usize,
}

impl BundleBuilder {
    pub fn new(provider: Arc<dyn MetadataProvider>, cache: Cache, max_people: usize) -> Self {
        Self {
            provider,
            cache,
            max_people,
        }
    }

    pub async fn build(&self, title: &str, year: i32) -> AppResult<MovieBundle> {
        let key = movie_key(title, year);

        if let Some(bundle) = self
            .cache
            .get_from_cache::<MovieBundle>(&CacheKey::Bundle(key.clone()))
            .await?
        {
            if bundle.complete {
                tracing::debug!(key = %key, "Bundle cache hit");
                return Ok(bundle);
            }
        }

        // First search result wins; no disambiguation
        let hits = self.provider.search_movie(title, year).await?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No provider match for {}", key)))?;

        let details = self.provider.movie_details(hit.id).await?;
        let roll = self.provider.movie_credits(hit.id).await?;

        let mut people = merge_people(&roll);
        people.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        people.truncate(self.max_people);

        // Strictly one at a time; the pacer is the only throughput control
        let mut filmographies = HashMap::new();
        for person in &people {
            match self.filmography(person.id).await {
                Ok(filmography) => {
                    filmographies.insert(person.id, filmography);
                }
                Err(AppError::AuthMissing) => return Err(AppError::AuthMissing),
                Err(e) => {
                    tracing::warn!(
                        person_id = person.id,
                        name = %person.name,
                        error = %e,
                        "Filmography fetch failed, omitting person from bundle"
                    );
                }
            }
        }

        let bundle = MovieBundle {
            movie_id: hit.id,
            title: details.title,
            year: details.year.unwrap_or(year),
            key: key.clone(),
            genre_ids: details.genre_ids,
            people,
            filmographies,
            complete: true,
            fetched_at: Utc::now(),
        };

        self.cache
            .set_in_background(&CacheKey::Bundle(key), &bundle);

        tracing::info!(
            key = %bundle.key,
            people = bundle.people.len(),
            filmographies = bundle.filmographies.len(),
            "Bundle assembled"
        );

        Ok(bundle)
    }

    /// Cache-first filmography lookup. Cached filmographies are permanent.
    async fn filmography(&self, person_id: u64) -> AppResult<Filmography> {
        cached!(self.cache, CacheKey::Filmography(person_id), async move {
            let raw = self.provider.person_movie_credits(person_id).await?;
            Ok::<_, AppError>(assemble_filmography(raw))
        })
    }
}

/// Merges a movie's cast and crew into one deduplicated person list.
///
/// Cast order is preserved, crew-only people follow. A person on both lists
/// collapses to `Role::Both` and keeps their crew job label; a person with
/// several allow-listed crew jobs keeps the first.
pub(crate) fn merge_people(roll: &MovieCredits) -> Vec<Person> {
    let mut people: Vec<Person> = Vec::new();
    let mut index_by_id: HashMap<u64, usize> = HashMap::new();

    for member in &roll.cast {
        if index_by_id.contains_key(&member.id) {
            continue;
        }
        index_by_id.insert(member.id, people.len());
        people.push(Person {
            id: member.id,
            name: member.name.clone(),
            role: Role::Performer,
            job: None,
            popularity: member.popularity,
        });
    }

    for member in &roll.crew {
        if !CREW_JOB_ALLOWLIST.contains(&member.job.as_str()) {
            continue;
        }
        match index_by_id.get(&member.id) {
            Some(&index) => {
                let person = &mut people[index];
                if person.role == Role::Performer {
                    person.role = Role::Both;
                }
                if person.job.is_none() {
                    person.job = Some(member.job.clone());
                }
            }
            None => {
                index_by_id.insert(member.id, people.len());
                people.push(Person {
                    id: member.id,
                    name: member.name.clone(),
                    role: Role::Crew,
                    job: Some(member.job.clone()),
                    popularity: member.popularity,
                });
            }
        }
    }

    people
}

/// Collapses a person's performer and crew credit lists into one
/// filmography, deduplicating by film. The performer entry wins when a
/// person both acted in and crewed the same film.
pub(crate) fn assemble_filmography(raw: PersonCredits) -> Filmography {
    let mut seen: HashSet<u64> = HashSet::new();
    let mut credits = Vec::new();

    for credit in raw.performer.into_iter().chain(raw.crew) {
        if seen.insert(credit.movie_id) {
            credits.push(credit);
        }
    }

    Filmography::new(credits)
}
