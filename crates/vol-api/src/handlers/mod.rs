pub mod health;
pub mod insights;
pub mod matches;
pub mod suggestions;
