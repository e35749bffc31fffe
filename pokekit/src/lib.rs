pub mod battle;
pub mod favorites;
pub mod filter;
pub mod page;
pub mod pokeapi;
pub mod pokemon;
pub mod snapshot;
pub mod store;
pub mod team;

mod error;
mod http;

pub use battle::Battle;
pub use error::Error;
pub use favorites::Favorites;
pub use filter::Filter;
pub use page::Page;
pub use pokeapi::PokeApi;
pub use pokemon::Pokemon;
pub use snapshot::Snapshot;
pub use store::Store;
pub use team::Team;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
