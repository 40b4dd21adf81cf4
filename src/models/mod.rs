pub mod race;
pub mod rating;
pub mod session;
pub mod trip;
pub mod user;
