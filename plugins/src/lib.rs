pub mod factory;
pub mod sandbox;
