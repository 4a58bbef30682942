//! Cyclic groups of prime order for discrete-logarithm cryptography.
//!
//! One polymorphic algebra contract ([`GroupAlgebra`]) with three
//! instantiations: the multiplicative group of integers modulo a prime,
//! elliptic curves over prime fields in affine coordinates (short
//! Weierstrass and Montgomery form), and an x-coordinate-only Montgomery
//! variant driven by the Montgomery ladder. Elements reach users wrapped in
//! [`GroupElement`] values tied to the algebra that produced them.

pub mod algebra;
pub mod curve;
pub mod element;
pub mod errors;
pub mod group;
pub mod multiplicative;

pub use self::algebra::GroupAlgebra;
pub use self::element::GroupElement;
pub use self::errors::{Error, Result};
pub use self::group::Group;
pub use self::multiplicative::MultiplicativeGroupAlgebra;
