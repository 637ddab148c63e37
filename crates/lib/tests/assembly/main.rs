mod common;
mod platform_tests;
