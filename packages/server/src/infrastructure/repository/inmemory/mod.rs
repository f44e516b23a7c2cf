//! In-memory repositories. State is lost on restart.

mod theater;

pub use theater::InMemoryTheaterRepository;
