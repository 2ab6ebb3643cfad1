//! Command-line front end for the enumstr binary.

pub mod args;
pub mod config;
pub mod driver;
pub mod input;
pub mod reporter;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/generated_code_tests.rs"]
mod generated_code_tests;
#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod input_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
