//! Closures produced by the remote accessor protocol.
//!
//! All three capture shared cell handles rather than the entity itself, so
//! they are `Send + Sync` and outlive any borrow of the entity.

/// Reads a named output.
pub type Getter = Box<dyn Fn() -> f64 + Send + Sync>;

/// Rebinds a named output to a fresh constant.
pub type Setter = Box<dyn Fn(f64) + Send + Sync>;

/// Sets input `x`, reads output `y`, optionally resets `x`.
pub type Link = Box<dyn Fn(f64) -> f64 + Send + Sync>;
