pub mod assess;
pub mod compare;
pub mod export_audit;
pub mod init;
pub mod questions;
pub mod validate;
