pub mod normalize;
pub mod script_model;
