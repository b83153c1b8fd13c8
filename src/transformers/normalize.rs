//! Normalize trait.

/// Pure line normalization (2 successive equal inputs -> 2 equal outputs).
pub trait Normalize {
    fn normalize(&self, line: &str) -> String;
}
