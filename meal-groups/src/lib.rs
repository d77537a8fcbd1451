//! Splits a pasted list of people into balanced lunch and dinner groups.
//!
//! The message is scanned by [`parser`], turned into per-person eligibility
//! by [`eligibility`] and handed to the randomized assignment search in
//! [`schedule`]. [`draw`] ties the three together; [`display`], [`export`]
//! and [`web`] present the result.

pub mod config;
pub mod display;
pub mod draw;
pub mod eligibility;
pub mod error;
pub mod export;
pub mod input;
pub mod parser;
pub mod schedule;
pub mod seed;
pub mod web;

pub use error::{DrawError, DrawResult};
