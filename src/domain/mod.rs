// Domain layer: resource models, region markup and ports. No I/O here.

pub mod markup;
pub mod model;
pub mod ports;
