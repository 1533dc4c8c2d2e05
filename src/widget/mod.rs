//! Host toolkit capability interface.

pub mod toolkit;

pub use toolkit::Toolkit;
