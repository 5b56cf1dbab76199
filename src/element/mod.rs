pub mod fields;
pub mod instance;
pub mod kind;
pub mod properties;
pub mod registry;
pub mod render;
