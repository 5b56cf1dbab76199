pub mod codec;
pub mod form;
