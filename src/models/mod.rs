pub mod account;
pub mod enums;
pub mod medicine;
pub mod profile;

pub use account::*;
pub use medicine::*;
pub use profile::*;
