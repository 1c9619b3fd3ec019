//! Domain values - versions, release series and signing keys

pub mod key;
pub mod series;
pub mod version;

pub use key::Key;
pub use series::{Series, SeriesKind};
pub use version::Version;
