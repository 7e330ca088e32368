//----------------------------------------
// util mod
//----------------------------------------
pub mod error;
pub(crate) mod validate;
