// Domain layer: row model, destinations and the ports the pipeline talks through.

pub mod model;
pub mod ports;
pub mod range;
