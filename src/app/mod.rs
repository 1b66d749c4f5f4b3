// Application layer: pipelines wiring adapters to the core transforms.

pub mod pipelines;
