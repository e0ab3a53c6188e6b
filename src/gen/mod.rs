pub mod harmonic;

pub use self::harmonic::*;
