pub mod actor;
pub mod movie;

pub use actor::{Actor, ActorChanges, ActorRequest, NewActor};
pub use movie::{Movie, MovieChanges, MovieRequest, NewMovie};
