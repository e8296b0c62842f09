pub mod client;

pub use client::{MlClient, QuizSignal, RecommendationSignals};
