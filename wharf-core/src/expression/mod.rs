mod compiler;
mod token;

pub use compiler::*;
pub use token::*;
