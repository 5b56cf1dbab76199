pub mod collector;
pub mod table;
pub mod validator;
