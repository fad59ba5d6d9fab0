pub mod diagnosis;
pub mod enums;
pub mod patient;
pub mod profile;

pub use diagnosis::*;
pub use enums::*;
pub use patient::*;
pub use profile::*;
