pub mod particle;
pub mod scheduler;
