//! Static game data for MECHABATTLE.
//!
//! Loads part and medal catalogs from JSON, resolves player loadouts into
//! spawnable blueprints, and generates random enemy loadouts. Unknown ids
//! and malformed files degrade to neutral values with a warning.

pub mod catalog;
pub mod error;
pub mod loadout;

pub use catalog::GameData;
pub use error::DataError;
pub use loadout::Loadout;
