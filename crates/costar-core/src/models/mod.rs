//! Catalog models: actors, movies, and the hops that connect them.

pub mod actor;
pub mod movie;
pub mod path;

pub use actor::{ActorRef, ActorSide};
pub use movie::MovieRef;
pub use path::{ConnectionPath, Hop};
