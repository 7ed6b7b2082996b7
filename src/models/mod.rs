//! Pre-trained model artifacts: label encoders and salary regressors.
//!
//! Both are plain data plus small, pure evaluation functions so the predictor
//! can stay generic over the artifact kind.

pub mod encoder;
pub mod regressor;

pub use encoder::*;
pub use regressor::*;
