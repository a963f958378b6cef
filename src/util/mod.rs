mod clamp;

pub use clamp::clamp;
