pub mod directory;
pub mod evaluation;
pub mod reports;
