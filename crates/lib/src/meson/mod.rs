//! Meson generators: machine files (`conan_meson_native.ini` /
//! `conan_meson_cross.ini`), the dependency flags file and the `meson setup`
//! command line that ties them together.

pub mod deps;
pub mod helper;
pub mod machine;
pub mod toolchain;

pub use deps::MesonDeps;
pub use helper::{MachineFiles, setup_args};
pub use machine::MachineFile;
pub use toolchain::MesonToolchain;
