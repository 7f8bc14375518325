pub mod comparison;
pub mod dynamodb;
pub mod lambda;
pub mod memory;
pub mod predictor;
pub mod record_store;
