// Domain layer - Core extraction types and policies

pub mod errors;
pub mod model;
pub mod rules;
