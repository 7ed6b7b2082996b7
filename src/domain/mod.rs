//! Domain types used throughout the app.
//!
//! This module defines:
//!
//! - the fixed input vocabularies (`Level`, `ROLES`) and experience ranges
//! - the model input (`FeatureVector`)
//! - prediction outputs (`PredictionResult`, `Prediction`, `UnseenCategory`)

pub mod types;

pub use types::*;
