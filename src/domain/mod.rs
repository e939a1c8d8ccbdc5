// Domain layer: litmus data model and the ports the runner is written against.

pub mod model;
pub mod ports;
