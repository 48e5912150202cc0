//! Command implementations for the docgen CLI
//!
//! Each command module loads its inputs and delegates to docgen-core for
//! the actual generation.

pub mod docx;
pub mod docx_template;
pub mod pdf;
