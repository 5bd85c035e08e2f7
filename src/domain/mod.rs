// Domain layer: core models and ports (interfaces) shared by the inference path and its adapters.

pub mod model;
pub mod ports;
