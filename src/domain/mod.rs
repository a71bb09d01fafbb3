// Domain layer: the exercise subjects, workspace models and ports (interfaces).

pub mod card;
pub mod deck;
pub mod model;
pub mod ports;
pub mod vector;
