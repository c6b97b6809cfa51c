pub mod backend;
pub mod error;
pub mod generation_model;
pub mod prompts;
pub mod scene_generator;
