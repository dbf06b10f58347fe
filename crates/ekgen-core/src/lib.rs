//! Core types for the ekgen electrokinetic kernel generator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! symbolic substrate every kernel builder works on: stencils, field
//! declarations, immutable expression trees, assignment collections,
//! reference evaluation, and the deterministic random stream.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assignment;
pub mod coord;
pub mod error;
pub mod eval;
pub mod expr;
pub mod field;
pub mod rng;
pub mod stencil;

pub use assignment::{Assignment, AssignmentCollection, SubAssignment};
pub use coord::{Axis, Cell, Offset, DIM};
pub use error::{ExprError, GenError};
pub use eval::{Env, FieldValues};
pub use expr::{Cond, Expr, FieldAccess, Func, RandomDraw, Symbol, SymbolKind};
pub use field::{ElementType, Field, FieldKind, Layout};
pub use rng::uniform_draw;
pub use stencil::{Direction, Stencil};
