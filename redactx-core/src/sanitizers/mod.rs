//! Rule compilation for RedactX.
//!
//! This module is responsible for turning stored rules into regular expressions
//! the engine can apply. Literal rules are escaped so their text is matched
//! exactly; regex rules are compiled as written. Rules that cannot be compiled
//! are dropped with a warning rather than failing the whole set.

pub mod compiler;
