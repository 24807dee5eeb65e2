pub mod entity;

pub use entity::{
    FilmCandidate, FilmDetails, LinkSource, Rating, StreamingLink, FILM_NOT_FOUND_MESSAGE,
};
