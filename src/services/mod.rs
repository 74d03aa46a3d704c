//! Signal computation.

pub mod normalizer;
pub mod ratings;

pub use normalizer::{normalize, Normalized};
pub use ratings::{rate, Ratings, Vote};
