pub mod events;
pub mod observations;
