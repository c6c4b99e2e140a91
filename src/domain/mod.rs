// Domain layer - core clip-workflow types and rules

pub mod model;
pub mod rules;
