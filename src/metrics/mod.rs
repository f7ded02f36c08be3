pub mod curve;
pub mod topk;

pub use curve::{AccuracyReport, accuracy_curve};
pub use topk::TopKGroupAccuracy;
