// Domain layer: raw dataset records, validated models and ports.

pub mod model;
pub mod ports;
pub mod record;
