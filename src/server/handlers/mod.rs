//! HTTP handlers.

mod panchang;
mod root;
mod stub;

pub use panchang::panchang_handler;
pub use root::root_handler;
pub use stub::stub_handler;
