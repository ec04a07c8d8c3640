pub mod apply;
pub mod events;
pub mod recommend;
pub mod refresh;
pub mod series;
