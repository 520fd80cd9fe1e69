//! GNU Autotools generators.

pub mod autotools;
pub mod deps;
pub mod triplet;

pub use autotools::AutotoolsToolchain;
pub use deps::AutotoolsDeps;
pub use triplet::gnu_triplet;
