pub mod catalog;
pub mod enrollment;
pub mod progress;
pub mod recommend;
