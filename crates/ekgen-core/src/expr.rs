//! Immutable symbolic expression trees.
//!
//! Expressions are built through smart constructors ([`Expr::add`],
//! [`Expr::mul`], [`Expr::pow`], ...) and the arithmetic operators, which
//! keep trees in a light canonical form:
//!
//! - nested sums and products are flattened,
//! - numeric constants are folded (`x + 0 → x`, `x·1 → x`, `x·0 → 0`,
//!   `x^1 → x`, `sqrt(0) → 0`, ...),
//! - the numeric coefficient of a product comes first,
//! - the derivative of a field-free expression is `0`.
//!
//! Trees are never mutated in place. Substitution is a transformation
//! ([`Expr::transform`]) returning a new tree, so rewrites can be scoped to
//! particular node kinds, e.g. only the keys of random draws
//! ([`Expr::map_random_keys`]).

use crate::coord::{Axis, Offset, DIM};
use indexmap::IndexSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Numeric domain of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Floating-point parameter.
    Real,
    /// Integer parameter (domain extents, time step, seed).
    Integer,
}

/// A named kernel parameter or subexpression result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
}

impl Symbol {
    /// A floating-point symbol.
    pub fn real(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Real,
        }
    }

    /// An integer symbol.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Integer,
        }
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The symbol's numeric domain.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read or write of one field component at a cell-relative offset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    /// Name of the accessed field.
    pub field: String,
    /// Component index (staggered direction index for flux fields).
    pub component: usize,
    /// Offset relative to the current cell.
    pub offset: Offset,
}

impl FieldAccess {
    /// Create an access.
    pub fn new(field: impl Into<String>, component: usize, offset: Offset) -> Self {
        Self {
            field: field.into(),
            component,
            offset,
        }
    }

    /// The same access translated by `by`.
    pub fn shifted(&self, by: Offset) -> Self {
        Self {
            field: self.field.clone(),
            component: self.component,
            offset: crate::coord::offset_add(self.offset, by),
        }
    }
}

impl fmt::Display for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field)?;
        if self.component > 0 {
            write!(f, "({})", self.component)?;
        }
        let [x, y, z] = self.offset;
        write!(f, "[{x},{y},{z}]")
    }
}

/// Elementary functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Func {
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Binary minimum.
    Min,
    /// Binary maximum.
    Max,
}

impl Func {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Sqrt | Self::Abs => 1,
            Self::Min | Self::Max => 2,
        }
    }
}

/// Boolean condition of a piecewise expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Cond {
    /// Constant truth value.
    Bool(bool),
    /// `lhs > rhs`.
    Gt(Expr, Expr),
    /// Conjunction.
    And(Vec<Cond>),
}

impl Cond {
    /// `lhs > rhs`, folded when both sides are numbers.
    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        match (lhs.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Bool(a > b),
            _ => Self::Gt(lhs, rhs),
        }
    }

    /// Conjunction of `conds`; an empty conjunction is `true`.
    pub fn and(conds: impl IntoIterator<Item = Cond>) -> Self {
        let mut out = Vec::new();
        for cond in conds {
            match cond {
                Self::Bool(true) => {}
                Self::Bool(false) => return Self::Bool(false),
                Self::And(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Self::Bool(true),
            1 => out.remove(0),
            _ => Self::And(out),
        }
    }

    fn map_exprs(&self, f: &mut dyn FnMut(&Expr) -> Expr) -> Self {
        match self {
            Self::Bool(b) => Self::Bool(*b),
            Self::Gt(a, b) => Self::gt(f(a), f(b)),
            Self::And(conds) => Self::and(conds.iter().map(|c| c.map_exprs(&mut *f))),
        }
    }

    fn exprs(&self) -> Vec<&Expr> {
        match self {
            Self::Bool(_) => Vec::new(),
            Self::Gt(a, b) => vec![a, b],
            Self::And(conds) => conds.iter().flat_map(Cond::exprs).collect(),
        }
    }
}

/// A draw from the deterministic random stream.
///
/// The draw is a pure function of its key: the three counter expressions
/// (normally the loop counters of the current cell), a channel index (the
/// staggered direction), the time step and the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDraw {
    /// Per-axis counters identifying the cell.
    pub counters: [Expr; DIM],
    /// Independent stream per cell, one per flux direction.
    pub channel: u32,
    /// Time step expression.
    pub time_step: Expr,
    /// Seed expression.
    pub seed: Expr,
}

impl RandomDraw {
    /// A draw keyed by the loop counters of the current cell.
    pub fn at_loop_counters(channel: u32, time_step: Expr, seed: Expr) -> Self {
        Self {
            counters: Axis::ALL.map(Expr::counter),
            channel,
            time_step,
            seed,
        }
    }

    /// Rewrite the counter expressions, leaving the rest of the key alone.
    pub fn map_counters(&self, mut f: impl FnMut(Axis, &Expr) -> Expr) -> Self {
        Self {
            counters: Axis::ALL.map(|axis| f(axis, &self.counters[axis.index()])),
            channel: self.channel,
            time_step: self.time_step.clone(),
            seed: self.seed.clone(),
        }
    }

    fn map_exprs(&self, f: &mut dyn FnMut(&Expr) -> Expr) -> Self {
        Self {
            counters: Axis::ALL.map(|axis| f(&self.counters[axis.index()])),
            channel: self.channel,
            time_step: f(&self.time_step),
            seed: f(&self.seed),
        }
    }
}

/// A symbolic expression.
///
/// Prefer the smart constructors over building variants directly; they
/// maintain the canonical form that structural equality relies on.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric constant.
    Num(f64),
    /// Named parameter.
    Symbol(Symbol),
    /// Field read.
    Access(FieldAccess),
    /// Loop counter of the kernel along an axis (the current cell index).
    Counter(Axis),
    /// Sum of at least two terms.
    Add(Vec<Expr>),
    /// Product of at least two factors.
    Mul(Vec<Expr>),
    /// `base ^ exponent`.
    Pow(Box<Expr>, Box<Expr>),
    /// Elementary function call.
    Call(Func, Vec<Expr>),
    /// Floor modulo `value mod modulus`, always in `[0, modulus)`.
    Mod(Box<Expr>, Box<Expr>),
    /// Continuum partial derivative along an axis.
    Diff(Box<Expr>, Axis),
    /// `if cond { then } else { otherwise }`.
    Piecewise(Box<Cond>, Box<Expr>, Box<Expr>),
    /// Draw from the deterministic random stream, uniform in `[0, 1)`.
    Random(Box<RandomDraw>),
}

impl Expr {
    /// Numeric constant.
    pub fn num(value: f64) -> Self {
        Self::Num(value)
    }

    /// The constant `0`.
    pub fn zero() -> Self {
        Self::Num(0.0)
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::Num(1.0)
    }

    /// A floating-point symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::real(name))
    }

    /// An integer symbol.
    pub fn int_symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::integer(name))
    }

    /// The loop counter along `axis`.
    pub fn counter(axis: Axis) -> Self {
        Self::Counter(axis)
    }

    /// A field read.
    pub fn access(access: FieldAccess) -> Self {
        Self::Access(access)
    }

    /// A random draw.
    pub fn random(draw: RandomDraw) -> Self {
        Self::Random(Box::new(draw))
    }

    /// Canonical sum of `terms`.
    pub fn add(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut constant = 0.0;
        let mut out = Vec::new();
        for term in terms {
            match term {
                Self::Num(v) => constant += v,
                Self::Add(inner) => {
                    for t in inner {
                        match t {
                            Self::Num(v) => constant += v,
                            other => out.push(other),
                        }
                    }
                }
                other => out.push(other),
            }
        }
        if constant != 0.0 {
            out.push(Self::Num(constant));
        }
        match out.len() {
            0 => Self::zero(),
            1 => out.remove(0),
            _ => Self::Add(out),
        }
    }

    /// Canonical product of `factors`.
    pub fn mul(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut coefficient = 1.0;
        let mut out = Vec::new();
        for factor in factors {
            match factor {
                Self::Num(v) => coefficient *= v,
                Self::Mul(inner) => {
                    for f in inner {
                        match f {
                            Self::Num(v) => coefficient *= v,
                            other => out.push(other),
                        }
                    }
                }
                other => out.push(other),
            }
        }
        if coefficient == 0.0 {
            return Self::zero();
        }
        if out.is_empty() {
            return Self::Num(coefficient);
        }
        if coefficient != 1.0 {
            out.insert(0, Self::Num(coefficient));
        }
        match out.len() {
            1 => out.remove(0),
            _ => Self::Mul(out),
        }
    }

    /// Canonical power `base ^ exponent`.
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        match (base.as_num(), exponent.as_num()) {
            (_, Some(e)) if e == 1.0 => base,
            (_, Some(e)) if e == 0.0 => Self::one(),
            (Some(b), Some(e)) => Self::Num(b.powf(e)),
            (Some(b), _) if b == 1.0 => Self::one(),
            _ => Self::Pow(Box::new(base), Box::new(exponent)),
        }
    }

    fn call(func: Func, args: Vec<Expr>) -> Self {
        let nums: Option<Vec<f64>> = args.iter().map(Expr::as_num).collect();
        if let Some(values) = nums {
            match (func, values.as_slice()) {
                (Func::Sqrt, [x]) if *x >= 0.0 => return Self::Num(x.sqrt()),
                (Func::Abs, [x]) => return Self::Num(x.abs()),
                (Func::Min, [a, b]) => return Self::Num(a.min(*b)),
                (Func::Max, [a, b]) => return Self::Num(a.max(*b)),
                _ => {}
            }
        }
        Self::Call(func, args)
    }

    /// Square root.
    pub fn sqrt(self) -> Self {
        Self::call(Func::Sqrt, vec![self])
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Self::call(Func::Abs, vec![self])
    }

    /// Minimum of `self` and `other`.
    pub fn min(self, other: impl Into<Expr>) -> Self {
        Self::call(Func::Min, vec![self, other.into()])
    }

    /// Maximum of `self` and `other`.
    pub fn max(self, other: impl Into<Expr>) -> Self {
        Self::call(Func::Max, vec![self, other.into()])
    }

    /// Floor modulo: the result lies in `[0, modulus)` for positive moduli.
    pub fn rem(self, modulus: impl Into<Expr>) -> Self {
        let modulus = modulus.into();
        match (self.as_num(), modulus.as_num()) {
            (Some(a), Some(m)) if m != 0.0 => Self::Num(a.rem_euclid(m)),
            _ => Self::Mod(Box::new(self), Box::new(modulus)),
        }
    }

    /// Continuum partial derivative along `axis`.
    pub fn diff(self, axis: Axis) -> Self {
        if !self.contains_access() && !self.contains_counter() {
            return Self::zero();
        }
        Self::Diff(Box::new(self), axis)
    }

    /// `if cond { then } else { otherwise }`, folded for constant conditions
    /// and identical branches.
    pub fn piecewise(cond: Cond, then: Expr, otherwise: Expr) -> Self {
        match cond {
            Cond::Bool(true) => then,
            Cond::Bool(false) => otherwise,
            _ if then == otherwise => then,
            cond => Self::Piecewise(Box::new(cond), Box::new(then), Box::new(otherwise)),
        }
    }

    /// The numeric value, if this is a constant.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is the constant `0`.
    pub fn is_zero(&self) -> bool {
        self.as_num() == Some(0.0)
    }

    /// Direct children, in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Num(_) | Self::Symbol(_) | Self::Access(_) | Self::Counter(_) => Vec::new(),
            Self::Add(items) | Self::Mul(items) | Self::Call(_, items) => items.iter().collect(),
            Self::Pow(a, b) | Self::Mod(a, b) => vec![a.as_ref(), b.as_ref()],
            Self::Diff(arg, _) => vec![arg.as_ref()],
            Self::Piecewise(cond, then, otherwise) => {
                let mut out = cond.exprs();
                out.push(then.as_ref());
                out.push(otherwise.as_ref());
                out
            }
            Self::Random(draw) => {
                let mut out: Vec<&Expr> = draw.counters.iter().collect();
                out.push(&draw.time_step);
                out.push(&draw.seed);
                out
            }
        }
    }

    /// Visit every node in pre-order.
    pub fn visit(&self, f: &mut dyn FnMut(&Expr)) {
        f(self);
        for child in self.children() {
            child.visit(&mut *f);
        }
    }

    fn any(&self, pred: &dyn Fn(&Expr) -> bool) -> bool {
        pred(self) || self.children().into_iter().any(|c| c.any(pred))
    }

    /// Whether any field is read.
    pub fn contains_access(&self) -> bool {
        self.any(&|e| matches!(e, Self::Access(_)))
    }

    /// Whether any loop counter appears.
    pub fn contains_counter(&self) -> bool {
        self.any(&|e| matches!(e, Self::Counter(_)))
    }

    /// Distinct field accesses in first-appearance order.
    pub fn accesses(&self) -> IndexSet<FieldAccess> {
        let mut out = IndexSet::new();
        self.visit(&mut |e| {
            if let Self::Access(a) = e {
                out.insert(a.clone());
            }
        });
        out
    }

    /// Distinct symbols in first-appearance order.
    pub fn free_symbols(&self) -> IndexSet<Symbol> {
        let mut out = IndexSet::new();
        self.visit(&mut |e| {
            if let Self::Symbol(s) = e {
                out.insert(s.clone());
            }
        });
        out
    }

    fn map_children(&self, f: &mut dyn FnMut(&Expr) -> Expr) -> Self {
        match self {
            Self::Num(_) | Self::Symbol(_) | Self::Access(_) | Self::Counter(_) => self.clone(),
            Self::Add(terms) => Self::add(terms.iter().map(|t| f(t))),
            Self::Mul(factors) => Self::mul(factors.iter().map(|t| f(t))),
            Self::Pow(base, exponent) => Self::pow(f(base.as_ref()), f(exponent.as_ref())),
            Self::Call(func, args) => Self::call(*func, args.iter().map(|a| f(a)).collect()),
            Self::Mod(value, modulus) => f(value.as_ref()).rem(f(modulus.as_ref())),
            Self::Diff(arg, axis) => f(arg.as_ref()).diff(*axis),
            Self::Piecewise(cond, then, otherwise) => {
                let cond = cond.map_exprs(&mut *f);
                Self::piecewise(cond, f(then.as_ref()), f(otherwise.as_ref()))
            }
            Self::Random(draw) => Self::random(draw.map_exprs(f)),
        }
    }

    /// Rebuild the tree top-down.
    ///
    /// `f` is offered every node before its children; returning `Some`
    /// replaces the whole subtree, returning `None` descends into it.
    /// Parents are rebuilt through the smart constructors, so the result is
    /// canonical again.
    pub fn transform(&self, f: &mut dyn FnMut(&Expr) -> Option<Expr>) -> Self {
        match f(self) {
            Some(replacement) => replacement,
            None => self.map_children(&mut |child| child.transform(&mut *f)),
        }
    }

    /// Replace every occurrence of `symbol` by `value`.
    pub fn substitute_symbol(&self, symbol: &Symbol, value: &Expr) -> Self {
        self.transform(&mut |e| match e {
            Self::Symbol(s) if s == symbol => Some(value.clone()),
            _ => None,
        })
    }

    /// Replace every field access by `f(access)`.
    pub fn map_accesses(&self, f: &mut dyn FnMut(&FieldAccess) -> Expr) -> Self {
        self.transform(&mut |e| match e {
            Self::Access(a) => Some(f(a)),
            _ => None,
        })
    }

    /// Translate every field access by `by`.
    pub fn shift(&self, by: Offset) -> Self {
        self.map_accesses(&mut |a| Self::Access(a.shifted(by)))
    }

    /// Rewrite the keys of random draws and nothing else.
    pub fn map_random_keys(&self, f: &mut dyn FnMut(&RandomDraw) -> RandomDraw) -> Self {
        self.transform(&mut |e| match e {
            Self::Random(draw) => Some(Self::random(f(draw.as_ref()))),
            _ => None,
        })
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl From<FieldAccess> for Expr {
    fn from(a: FieldAccess) -> Self {
        Self::Access(a)
    }
}

// ── Operators ──────────────────────────────────────────────────────

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::add([self, rhs])
    }
}

impl Add<f64> for Expr {
    type Output = Expr;
    fn add(self, rhs: f64) -> Expr {
        Expr::add([self, Expr::Num(rhs)])
    }
}

impl Add<Expr> for f64 {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::add([Expr::Num(self), rhs])
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::mul([Expr::Num(-1.0), self])
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::add([self, -rhs])
    }
}

impl Sub<f64> for Expr {
    type Output = Expr;
    fn sub(self, rhs: f64) -> Expr {
        Expr::add([self, Expr::Num(-rhs)])
    }
}

impl Sub<Expr> for f64 {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::add([Expr::Num(self), -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul([self, rhs])
    }
}

impl Mul<f64> for Expr {
    type Output = Expr;
    fn mul(self, rhs: f64) -> Expr {
        Expr::mul([self, Expr::Num(rhs)])
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul([Expr::Num(self), rhs])
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::mul([self, Expr::pow(rhs, Expr::Num(-1.0))])
    }
}

impl Div<f64> for Expr {
    type Output = Expr;
    fn div(self, rhs: f64) -> Expr {
        Expr::mul([self, Expr::Num(1.0 / rhs)])
    }
}

// ── Rendering ──────────────────────────────────────────────────────

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str, prec: u8) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        item.fmt_prec(f, prec)?;
    }
    Ok(())
}

impl Expr {
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let own = match self {
            Self::Add(_) => PREC_ADD,
            Self::Mul(_) => PREC_MUL,
            Self::Pow(..) => PREC_POW,
            Self::Num(v) if *v < 0.0 => PREC_ADD,
            _ => u8::MAX,
        };
        let wrap = own < parent;
        if wrap {
            f.write_str("(")?;
        }
        match self {
            Self::Num(v) => write!(f, "{v}")?,
            Self::Symbol(s) => write!(f, "{s}")?,
            Self::Access(a) => write!(f, "{a}")?,
            Self::Counter(axis) => write!(f, "ctr_{axis}")?,
            Self::Add(terms) => write_joined(f, terms, " + ", PREC_ADD)?,
            Self::Mul(factors) => write_joined(f, factors, "*", PREC_MUL + 1)?,
            Self::Pow(base, exponent) => {
                base.fmt_prec(f, PREC_POW + 1)?;
                f.write_str("**")?;
                exponent.fmt_prec(f, PREC_POW + 1)?;
            }
            Self::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                write_joined(f, args, ", ", 0)?;
                f.write_str(")")?;
            }
            Self::Mod(value, modulus) => write!(f, "mod({value}, {modulus})")?,
            Self::Diff(arg, axis) => write!(f, "Diff({arg}, {axis})")?,
            Self::Piecewise(cond, then, otherwise) => {
                write!(f, "select({cond}, {then}, {otherwise})")?
            }
            Self::Random(draw) => {
                let [x, y, z] = &draw.counters;
                write!(
                    f,
                    "random({x}, {y}, {z}; channel {}; {}, {})",
                    draw.channel, draw.time_step, draw.seed
                )?;
            }
        }
        if wrap {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Gt(a, b) => write!(f, "{a} > {b}"),
            Self::And(conds) => {
                f.write_str("(")?;
                for (i, c) in conds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" && ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(off: Offset) -> Expr {
        Expr::access(FieldAccess::new("c", 0, off))
    }

    #[test]
    fn add_drops_zero_and_flattens() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(x.clone() + 0.0, x);
        let nested = (x.clone() + y.clone()) + (x.clone() + 1.0);
        assert_eq!(
            nested,
            Expr::Add(vec![x.clone(), y, x, Expr::Num(1.0)])
        );
    }

    #[test]
    fn mul_folds_coefficient_first() {
        let x = Expr::symbol("x");
        assert_eq!(x.clone() * 1.0, x);
        assert_eq!(x.clone() * 0.0, Expr::zero());
        assert_eq!(
            2.0 * (x.clone() * 3.0),
            Expr::Mul(vec![Expr::Num(6.0), x.clone()])
        );
        assert_eq!(-(-x.clone()), x);
    }

    #[test]
    fn pow_identities() {
        let x = Expr::symbol("x");
        assert_eq!(Expr::pow(x.clone(), Expr::one()), x);
        assert_eq!(Expr::pow(x.clone(), Expr::zero()), Expr::one());
        assert_eq!(Expr::pow(Expr::num(2.0), Expr::num(3.0)), Expr::num(8.0));
        assert_eq!(
            x.clone() / x.clone(),
            Expr::Mul(vec![x.clone(), Expr::pow(x, Expr::num(-1.0))])
        );
    }

    #[test]
    fn functions_fold_on_constants() {
        assert_eq!(Expr::zero().sqrt(), Expr::zero());
        assert_eq!(Expr::num(-2.0).abs(), Expr::num(2.0));
        assert_eq!(Expr::num(3.0).min(1.0), Expr::num(1.0));
        assert_eq!(Expr::num(-3.0).max(0.0), Expr::zero());
        assert_eq!(Expr::num(-1.0).rem(4.0), Expr::num(3.0));
        // sqrt of a negative constant stays symbolic
        assert!(matches!(Expr::num(-1.0).sqrt(), Expr::Call(Func::Sqrt, _)));
    }

    #[test]
    fn diff_of_field_free_expression_is_zero() {
        let d = Expr::symbol("D");
        assert_eq!(d.diff(Axis::X), Expr::zero());
        assert!(matches!(c([0, 0, 0]).diff(Axis::Y), Expr::Diff(_, Axis::Y)));
    }

    #[test]
    fn piecewise_folds() {
        let x = Expr::symbol("x");
        assert_eq!(
            Expr::piecewise(Cond::gt(Expr::one(), Expr::zero()), x.clone(), Expr::zero()),
            x
        );
        assert_eq!(
            Expr::piecewise(Cond::gt(x.clone(), Expr::zero()), x.clone(), x.clone()),
            x
        );
        assert_eq!(
            Cond::and([Cond::Bool(true), Cond::gt(x.clone(), Expr::zero())]),
            Cond::Gt(x, Expr::zero())
        );
    }

    #[test]
    fn shift_moves_every_access() {
        let e = c([0, 0, 0]) * c([1, 0, 0]);
        let shifted = e.shift([-1, 0, 0]);
        assert_eq!(shifted, c([-1, 0, 0]) * c([0, 0, 0]));
    }

    #[test]
    fn substitute_symbol_matches_name_and_kind() {
        let e = Expr::symbol("D") * c([0, 0, 0]) + Expr::symbol("z");
        let d = Symbol::real("D");
        assert_eq!(e.substitute_symbol(&d, &Expr::zero()), Expr::symbol("z"));
        assert_eq!(
            e.substitute_symbol(&d, &Expr::symbol("k")),
            Expr::symbol("k") * c([0, 0, 0]) + Expr::symbol("z")
        );

        let step = Expr::int_symbol("D") + 1.0;
        assert_eq!(step.substitute_symbol(&d, &Expr::zero()), step);
    }

    #[test]
    fn map_random_keys_leaves_counters_outside_draws() {
        let outside = Expr::counter(Axis::X);
        let draw = Expr::random(RandomDraw::at_loop_counters(
            0,
            Expr::int_symbol("time_step"),
            Expr::int_symbol("seed"),
        ));
        let e = outside.clone() + draw;
        let folded = e.map_random_keys(&mut |d| d.map_counters(|_, ctr| ctr.clone().rem(8.0)));
        let Expr::Add(terms) = &folded else {
            panic!("expected a sum, got {folded}");
        };
        assert_eq!(terms[0], outside);
        let Expr::Random(d) = &terms[1] else {
            panic!("expected a draw");
        };
        assert_eq!(d.counters[0], Expr::counter(Axis::X).rem(8.0));
    }

    #[test]
    fn free_symbols_in_order() {
        let e = Expr::symbol("D") * Expr::symbol("z") + Expr::symbol("D");
        let names: Vec<_> = e.free_symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["D", "z"]);
    }

    #[test]
    fn display_respects_precedence() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(((x.clone() + y.clone()) * 2.0).to_string(), "2*(x + y)");
        assert_eq!((x - y).to_string(), "x + (-1)*y");
        assert_eq!(c([-1, 0, 0]).to_string(), "c[-1,0,0]");
    }

    proptest! {
        #[test]
        fn add_is_constant_folded(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assert_eq!(Expr::num(a) + Expr::num(b), Expr::num(a + b));
        }

        #[test]
        fn rem_folds_into_range(v in -1000i64..1000, m in 1i64..64) {
            let folded = Expr::num(v as f64).rem(m as f64);
            let value = folded.as_num().unwrap();
            prop_assert!(value >= 0.0 && value < m as f64);
        }
    }
}
