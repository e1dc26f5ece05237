pub mod core;
pub mod main;
pub mod outcome;
pub mod presenter;
pub mod render;
pub mod run_effect;
