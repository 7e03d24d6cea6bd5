#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod calendar;
pub mod compose;
pub mod config;
pub mod context;
pub mod diff;
pub mod engine;
pub mod extract;
pub mod pattern;
pub mod render;
pub mod segment;
pub mod utils;

pub use engine::{parse, parse_with, resolve, Resolution};
