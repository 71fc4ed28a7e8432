pub mod cv;
pub mod session;
pub mod template;
