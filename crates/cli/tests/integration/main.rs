mod build_tests;
mod common;
mod config_tests;
