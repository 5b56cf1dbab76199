pub mod draft;
pub mod drag;
pub mod ids;
pub mod session;
pub mod store;
