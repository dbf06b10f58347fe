//! Error types for kernel construction and reference evaluation.
//!
//! Construction errors ([`GenError`]) are generation-time faults: a
//! builder that returns one has produced no partial output, and the
//! caller is expected to abort generation. Evaluation errors
//! ([`ExprError`]) only arise when a generated kernel is interpreted
//! against concrete values.

use crate::coord::{Axis, Cell};
use std::error::Error;
use std::fmt;

/// Errors raised while constructing kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenError {
    /// The advective and diffusive flux for one direction address
    /// different staggered locations.
    FluxTargetMismatch {
        /// Index of the staggered direction.
        direction: usize,
        /// Target of the advective contribution.
        advective: String,
        /// Target of the diffusive contribution.
        diffusive: String,
    },
    /// The advective and diffusive flux lists cover a different number
    /// of directions.
    FluxCountMismatch {
        /// Number of advective assignments.
        advective: usize,
        /// Number of diffusive assignments.
        diffusive: usize,
    },
    /// A flux collection does not carry one assignment per staggered
    /// direction of its flux field.
    DirectionCountMismatch {
        /// The staggered flux field.
        field: String,
        /// Number of staggered directions of the field.
        directions: usize,
        /// Number of main assignments in the collection.
        assignments: usize,
    },
    /// A flux assignment does not write the face of its direction.
    FaceTargetMismatch {
        /// Index of the staggered direction.
        direction: usize,
        /// The face access the direction owns.
        expected: String,
        /// The access the assignment writes.
        found: String,
    },
    /// A staggered operation was requested on a non-staggered field.
    NotStaggered {
        /// The offending field.
        field: String,
    },
    /// A component index exceeds the field's component count.
    ComponentOutOfRange {
        /// The field.
        field: String,
        /// Requested component.
        component: usize,
        /// Number of components the field has.
        components: usize,
    },
    /// Species, flux field, coefficient and order lists disagree in length.
    SpeciesMismatch {
        /// Number of concentration fields.
        species: usize,
        /// Number of reaction flux fields.
        flux_fields: usize,
        /// Number of stoichiometric coefficients.
        coefficients: usize,
        /// Number of reaction orders.
        orders: usize,
    },
    /// A reaction was requested with no species.
    NoSpecies,
    /// A target appears more than once on the left-hand side.
    DuplicateTarget {
        /// Rendered target.
        target: String,
    },
    /// A subexpression symbol is defined more than once.
    DuplicateSymbol {
        /// The symbol name.
        name: String,
    },
    /// No stencil with the given number of neighbours exists.
    UnsupportedStencil {
        /// The requested neighbour count.
        arity: usize,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FluxTargetMismatch {
                direction,
                advective,
                diffusive,
            } => write!(
                f,
                "flux target mismatch in direction {direction}: advective writes {advective}, diffusive writes {diffusive}"
            ),
            Self::FluxCountMismatch {
                advective,
                diffusive,
            } => write!(
                f,
                "flux count mismatch: {advective} advective vs {diffusive} diffusive assignments"
            ),
            Self::DirectionCountMismatch {
                field,
                directions,
                assignments,
            } => write!(
                f,
                "flux field '{field}' has {directions} staggered directions but the collection has {assignments} assignments"
            ),
            Self::FaceTargetMismatch {
                direction,
                expected,
                found,
            } => write!(
                f,
                "flux for direction {direction} writes {found} instead of {expected}"
            ),
            Self::NotStaggered { field } => {
                write!(f, "field '{field}' is not a staggered flux field")
            }
            Self::ComponentOutOfRange {
                field,
                component,
                components,
            } => write!(
                f,
                "component {component} out of range for field '{field}' with {components} components"
            ),
            Self::SpeciesMismatch {
                species,
                flux_fields,
                coefficients,
                orders,
            } => write!(
                f,
                "species mismatch: {species} species, {flux_fields} flux fields, {coefficients} coefficients, {orders} orders"
            ),
            Self::NoSpecies => write!(f, "reaction needs at least one species"),
            Self::DuplicateTarget { target } => {
                write!(f, "target {target} assigned more than once")
            }
            Self::DuplicateSymbol { name } => {
                write!(f, "subexpression '{name}' defined more than once")
            }
            Self::UnsupportedStencil { arity } => {
                write!(f, "no stencil with {arity} neighbours (expected 6, 18 or 26)")
            }
        }
    }
}

impl Error for GenError {}

/// Errors raised while evaluating an expression against concrete values.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprError {
    /// A symbol has no bound value.
    UnboundSymbol {
        /// The symbol name.
        name: String,
    },
    /// A field value is not available at the requested cell.
    MissingValue {
        /// The field.
        field: String,
        /// The component.
        component: usize,
        /// The absolute cell that was read.
        cell: Cell,
    },
    /// A continuum derivative survived discretization.
    UndiscretizedDerivative {
        /// Axis of the derivative.
        axis: Axis,
    },
    /// A random draw key did not evaluate to non-negative integers.
    InvalidRandomKey {
        /// What was wrong with the key.
        reason: String,
    },
    /// Modulo with a zero modulus.
    ModuloByZero,
    /// A function call with the wrong number of arguments.
    BadArity {
        /// The function name.
        function: String,
        /// Number of arguments the function takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundSymbol { name } => write!(f, "unbound symbol '{name}'"),
            Self::MissingValue {
                field,
                component,
                cell,
            } => write!(
                f,
                "no value for field '{field}' component {component} at cell {cell:?}"
            ),
            Self::UndiscretizedDerivative { axis } => {
                write!(f, "continuum derivative along axis {axis} cannot be evaluated")
            }
            Self::InvalidRandomKey { reason } => write!(f, "invalid random key: {reason}"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::BadArity {
                function,
                expected,
                found,
            } => write!(
                f,
                "{function} takes {expected} argument(s) but was given {found}"
            ),
        }
    }
}

impl Error for ExprError {}
