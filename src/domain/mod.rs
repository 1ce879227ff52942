// Domain layer: value types and the ports the page behaviors talk through.

pub mod model;
pub mod ports;
