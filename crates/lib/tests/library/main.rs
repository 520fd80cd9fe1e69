mod common;

mod autotools_tests;
mod meson_tests;
