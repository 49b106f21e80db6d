// Domain layer: core models and ports (interfaces). Nothing here talks to the network or the filesystem.

pub mod model;
pub mod ports;
