pub mod engine;
pub mod fit;
pub mod motion;
pub mod scene;
pub mod shape;
pub mod string;
