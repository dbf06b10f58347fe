//! Assignments and assignment collections.
//!
//! An [`AssignmentCollection`] is the unit every builder returns: an ordered
//! list of field writes plus an ordered list of named subexpressions the
//! writes may reference. Targets are unique within a collection, and
//! subexpression names are unique.

use crate::coord::Cell;
use crate::error::{ExprError, GenError};
use crate::eval::{Env, FieldValues};
use crate::expr::{Expr, FieldAccess, RandomDraw, Symbol};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// A field write `lhs ← rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Written location.
    pub lhs: FieldAccess,
    /// Value expression.
    pub rhs: Expr,
}

impl Assignment {
    /// Create an assignment.
    pub fn new(lhs: FieldAccess, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ← {}", self.lhs, self.rhs)
    }
}

/// A named intermediate `symbol ← rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct SubAssignment {
    /// Defined symbol.
    pub lhs: Symbol,
    /// Value expression.
    pub rhs: Expr,
}

impl SubAssignment {
    /// Create a subexpression.
    pub fn new(lhs: Symbol, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for SubAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ← {}", self.lhs, self.rhs)
    }
}

/// Ordered main assignments plus ordered subexpressions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentCollection {
    main: Vec<Assignment>,
    subexpressions: Vec<SubAssignment>,
}

impl AssignmentCollection {
    /// A collection with no subexpressions.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::DuplicateTarget`] if two assignments write the
    /// same location.
    pub fn new(main: Vec<Assignment>) -> Result<Self, GenError> {
        let mut seen = IndexSet::new();
        for a in &main {
            if !seen.insert(&a.lhs) {
                return Err(GenError::DuplicateTarget {
                    target: a.lhs.to_string(),
                });
            }
        }
        Ok(Self {
            main,
            subexpressions: Vec::new(),
        })
    }

    /// A collection holding one assignment.
    pub fn single(assignment: Assignment) -> Self {
        Self {
            main: vec![assignment],
            subexpressions: Vec::new(),
        }
    }

    /// Replace the subexpressions.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::DuplicateSymbol`] if a name is defined twice.
    pub fn with_subexpressions(
        mut self,
        subexpressions: Vec<SubAssignment>,
    ) -> Result<Self, GenError> {
        let mut seen = IndexSet::new();
        for s in &subexpressions {
            if !seen.insert(s.lhs.name()) {
                return Err(GenError::DuplicateSymbol {
                    name: s.lhs.name().to_string(),
                });
            }
        }
        self.subexpressions = subexpressions;
        Ok(self)
    }

    /// Main assignments in order.
    pub fn main(&self) -> &[Assignment] {
        &self.main
    }

    /// Subexpressions in order.
    pub fn subexpressions(&self) -> &[SubAssignment] {
        &self.subexpressions
    }

    /// Number of main assignments.
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Whether there are no main assignments.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Rewrite every right-hand side, keeping targets and order.
    pub fn map_rhs(&self, mut f: impl FnMut(&Expr) -> Expr) -> Self {
        Self {
            main: self
                .main
                .iter()
                .map(|a| Assignment::new(a.lhs.clone(), f(&a.rhs)))
                .collect(),
            subexpressions: self
                .subexpressions
                .iter()
                .map(|s| SubAssignment::new(s.lhs.clone(), f(&s.rhs)))
                .collect(),
        }
    }

    /// Rewrite the keys of every random draw, in main assignments and
    /// subexpressions alike.
    pub fn map_random_keys(&self, f: &mut dyn FnMut(&RandomDraw) -> RandomDraw) -> Self {
        self.map_rhs(|e| e.map_random_keys(&mut *f))
    }

    /// Locations written by the main assignments.
    pub fn writes(&self) -> Vec<&FieldAccess> {
        self.main.iter().map(|a| &a.lhs).collect()
    }

    /// Distinct locations read by any right-hand side.
    pub fn reads(&self) -> IndexSet<FieldAccess> {
        let mut out = IndexSet::new();
        for rhs in self.rhs_iter() {
            out.extend(rhs.accesses());
        }
        out
    }

    /// Symbols the kernel needs as parameters: every symbol referenced
    /// and not defined by a subexpression.
    pub fn free_symbols(&self) -> IndexSet<Symbol> {
        let defined: IndexSet<&str> = self.subexpressions.iter().map(|s| s.lhs.name()).collect();
        let mut out = IndexSet::new();
        for rhs in self.rhs_iter() {
            for s in rhs.free_symbols() {
                if !defined.contains(s.name()) {
                    out.insert(s);
                }
            }
        }
        out
    }

    fn rhs_iter(&self) -> impl Iterator<Item = &Expr> {
        self.subexpressions
            .iter()
            .map(|s| &s.rhs)
            .chain(self.main.iter().map(|a| &a.rhs))
    }

    /// Evaluate every main assignment at `cell`.
    ///
    /// Subexpressions are evaluated first, in order, each seeing the
    /// previous ones; then all main right-hand sides are evaluated against
    /// the unmodified `fields`.
    ///
    /// # Errors
    ///
    /// Propagates the first evaluation error.
    pub fn evaluate_at(
        &self,
        fields: &dyn FieldValues,
        symbols: &IndexMap<String, f64>,
        cell: Cell,
    ) -> Result<Vec<(FieldAccess, f64)>, ExprError> {
        let mut env = Env::new(fields).at(cell);
        for (name, value) in symbols {
            env.bind(name.clone(), *value);
        }
        for s in &self.subexpressions {
            let v = s.rhs.evaluate(&env)?;
            env.bind(s.lhs.name(), v);
        }
        self.main
            .iter()
            .map(|a| a.rhs.evaluate(&env).map(|v| (a.lhs.clone(), v)))
            .collect()
    }
}

impl fmt::Display for AssignmentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.subexpressions {
            writeln!(f, "{s}")?;
        }
        for a in &self.main {
            writeln!(f, "{a}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(field: &str, component: usize, rhs: Expr) -> Assignment {
        Assignment::new(FieldAccess::new(field, component, [0; 3]), rhs)
    }

    #[test]
    fn duplicate_target_rejected() {
        let err = AssignmentCollection::new(vec![
            write("c", 0, Expr::one()),
            write("c", 0, Expr::zero()),
        ]);
        assert_eq!(
            err,
            Err(GenError::DuplicateTarget {
                target: "c[0,0,0]".into()
            })
        );
        assert!(AssignmentCollection::new(vec![
            write("j", 0, Expr::one()),
            write("j", 1, Expr::one()),
        ])
        .is_ok());
    }

    #[test]
    fn writes_follow_main_order() {
        let ac = AssignmentCollection::new(vec![
            write("j", 1, Expr::one()),
            write("j", 0, Expr::access(FieldAccess::new("c", 0, [1, 0, 0]))),
        ])
        .unwrap();
        let writes: Vec<_> = ac.writes().into_iter().map(|a| a.to_string()).collect();
        assert_eq!(writes, vec!["j(1)[0,0,0]", "j[0,0,0]"]);
        assert!(ac.reads().iter().all(|r| r.field == "c"));
    }

    #[test]
    fn duplicate_subexpression_rejected() {
        let ac = AssignmentCollection::new(vec![write("c", 0, Expr::symbol("a"))]).unwrap();
        let err = ac.with_subexpressions(vec![
            SubAssignment::new(Symbol::real("a"), Expr::one()),
            SubAssignment::new(Symbol::real("a"), Expr::zero()),
        ]);
        assert_eq!(err, Err(GenError::DuplicateSymbol { name: "a".into() }));
    }

    #[test]
    fn free_symbols_exclude_subexpressions() {
        let ac = AssignmentCollection::new(vec![write(
            "c",
            0,
            Expr::symbol("a") * Expr::symbol("D"),
        )])
        .unwrap()
        .with_subexpressions(vec![SubAssignment::new(
            Symbol::real("a"),
            Expr::symbol("k") + 1.0,
        )])
        .unwrap();
        let names: Vec<_> = ac.free_symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["k", "D"]);
    }

    struct Const(f64);

    impl FieldValues for Const {
        fn value(&self, _: &str, _: usize, _: Cell) -> Option<f64> {
            Some(self.0)
        }
    }

    #[test]
    fn evaluate_sees_subexpressions() {
        let c = Expr::access(FieldAccess::new("c", 0, [0; 3]));
        let ac = AssignmentCollection::new(vec![write("c", 0, c + Expr::symbol("a"))])
            .unwrap()
            .with_subexpressions(vec![SubAssignment::new(
                Symbol::real("a"),
                Expr::symbol("k") * 2.0,
            )])
            .unwrap();
        let mut symbols = IndexMap::new();
        symbols.insert("k".to_string(), 1.5);
        let out = ac.evaluate_at(&Const(1.0), &symbols, [0, 0, 0]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, 4.0);
    }
}
