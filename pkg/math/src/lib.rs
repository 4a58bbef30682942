pub mod field;
pub mod gcd;
pub mod length;
pub mod prime;
pub mod random;

pub use self::field::Field;
pub use self::length::NumberLength;
pub use self::prime::{BigPrime, CompositeError};
