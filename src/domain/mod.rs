// Domain layer: service records, the registry and the ports the engines depend on.

pub mod model;
pub mod ports;
