// Domain layer: value records, ISO date handling and ports.

pub mod date;
pub mod model;
pub mod ports;
