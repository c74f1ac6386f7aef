//! Grammar productions, split by what they produce.
//!
//! - `decl`: file structure, imports, top-level declarations, recovery
//! - `ty`: type expressions, signatures, field lists, struct/interface bodies

mod decl;
mod ty;
