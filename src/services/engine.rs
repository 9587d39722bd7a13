use std::collections::HashSet;

use crate::models::{link_usage, CandidateMove, GameSnapshot, MovieBundle, PriorityFilter};

/// A connection name is retired by the game after this many uses
pub const MAX_LINK_USES: u32 = 3;

/// While this many movies or fewer are on the board (starting movie
/// included), only well-known films are valid moves
pub const SETUP_PHASE_MOVES: usize = 3;

/// Ranks every playable next-movie reachable from the bundle's people.
///
/// Pure function of its inputs: recomputed on every call, never cached, and
/// it never fails — anything malformed or missing is filtered out, so the
/// worst case is an empty list.
///
/// Ordering: priority candidates first, then score (the connecting person's
/// filmography depth) descending; ties keep encounter order, which is the
/// bundle's people order (popularity-sorted) then each filmography's credit
/// order. A film reachable through several people appears once, under its
/// best-ranked connection.
pub fn rank(
    bundle: &MovieBundle,
    snapshot: &GameSnapshot,
    filter: &PriorityFilter,
    current_year: i32,
    popularity_floor: f64,
) -> Vec<CandidateMove> {
    let setup_phase = snapshot.played.len() <= SETUP_PHASE_MOVES;
    let usage = link_usage(&snapshot.used_links);
    let played: HashSet<String> = snapshot
        .played
        .iter()
        .map(|key| key.to_lowercase())
        .collect();

    let mut candidates: Vec<CandidateMove> = Vec::new();

    for person in &bundle.people {
        if usage
            .get(&person.name.to_lowercase())
            .is_some_and(|&count| count >= MAX_LINK_USES)
        {
            continue;
        }

        let Some(filmography) = bundle.filmographies.get(&person.id) else {
            continue;
        };

        for credit in &filmography.credits {
            if played.contains(&credit.key().to_lowercase()) {
                continue;
            }
            // Unreleased and current-year films are not playable
            if credit.year >= current_year {
                continue;
            }
            if credit.movie_id == bundle.movie_id {
                continue;
            }

            let well_known = credit.popularity >= popularity_floor;
            if setup_phase && !well_known {
                continue;
            }

            candidates.push(CandidateMove {
                movie_id: credit.movie_id,
                title: credit.title.clone(),
                year: credit.year,
                key: credit.key(),
                via_person_id: person.id,
                via_person: person.name.clone(),
                score: filmography.credit_count,
                is_priority: filter.matches(credit),
                well_known,
            });
        }
    }

    // Stable sort keeps encounter order within equal (priority, score)
    candidates.sort_by(|a, b| {
        b.is_priority
            .cmp(&a.is_priority)
            .then(b.score.cmp(&a.score))
    });

    let mut seen: HashSet<u64> = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.movie_id));

    candidates
}
