// Domain layer: models, capabilities and ports. No I/O happens here.

pub mod model;
pub mod ports;
pub mod services;
