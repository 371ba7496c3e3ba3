pub use wharf_core::*;
