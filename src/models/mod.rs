pub mod game;
pub mod movie;
pub mod tmdb;

pub use game::{link_usage, CandidateMove, GameSnapshot, PriorityFilter};
pub use movie::{
    movie_key, CastMember, Credit, CrewMember, Filmography, MovieBundle, MovieCredits, MovieRef,
    Person, PersonCredits, Role,
};
