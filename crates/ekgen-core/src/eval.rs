//! Reference evaluation of expressions at a single cell.
//!
//! This is a plain tree-walking interpreter used to check generated
//! kernels against concrete numbers. It is not a code generator.

use crate::coord::{shift_cell, Axis, Cell};
use crate::error::ExprError;
use crate::expr::{Cond, Expr, Func, RandomDraw};
use crate::rng::uniform_draw;
use indexmap::IndexMap;

/// Read-only source of field values.
pub trait FieldValues {
    /// Value of `field`'s `component` at absolute `cell`, or `None` if the
    /// cell lies outside the stored region.
    fn value(&self, field: &str, component: usize, cell: Cell) -> Option<f64>;
}

/// Evaluation environment: field values, symbol bindings and the current cell.
pub struct Env<'a> {
    fields: &'a dyn FieldValues,
    symbols: IndexMap<String, f64>,
    cell: Cell,
}

impl<'a> Env<'a> {
    /// An environment with no symbols bound, positioned at the origin.
    pub fn new(fields: &'a dyn FieldValues) -> Self {
        Self {
            fields,
            symbols: IndexMap::new(),
            cell: [0; 3],
        }
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: f64) {
        self.symbols.insert(name.into(), value);
    }

    /// Builder form of [`Env::bind`].
    pub fn with_symbol(mut self, name: impl Into<String>, value: f64) -> Self {
        self.bind(name, value);
        self
    }

    /// Builder form of [`Env::set_cell`].
    pub fn at(mut self, cell: Cell) -> Self {
        self.cell = cell;
        self
    }

    /// Move to `cell`.
    pub fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// The current cell.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// The value bound to `name`.
    pub fn symbol(&self, name: &str) -> Option<f64> {
        self.symbols.get(name).copied()
    }
}

fn key_integer(value: f64, what: &str) -> Result<i64, ExprError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ExprError::InvalidRandomKey {
            reason: format!("{what} = {value} is not an integer"),
        });
    }
    Ok(value as i64)
}

fn key_unsigned(value: f64, what: &str) -> Result<u64, ExprError> {
    let v = key_integer(value, what)?;
    u64::try_from(v).map_err(|_| ExprError::InvalidRandomKey {
        reason: format!("{what} = {v} is negative"),
    })
}

impl RandomDraw {
    /// Evaluate the key and draw.
    pub fn evaluate(&self, env: &Env<'_>) -> Result<f64, ExprError> {
        let mut counters = [0i64; 3];
        for axis in Axis::ALL {
            let v = self.counters[axis.index()].evaluate(env)?;
            counters[axis.index()] = key_integer(v, "counter")?;
        }
        let time_step = key_unsigned(self.time_step.evaluate(env)?, "time step")?;
        let seed = key_unsigned(self.seed.evaluate(env)?, "seed")?;
        Ok(uniform_draw(counters, self.channel, time_step, seed))
    }
}

impl Cond {
    /// Evaluate the condition.
    pub fn evaluate(&self, env: &Env<'_>) -> Result<bool, ExprError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Gt(a, b) => Ok(a.evaluate(env)? > b.evaluate(env)?),
            Self::And(conds) => {
                for c in conds {
                    if !c.evaluate(env)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl Expr {
    /// Evaluate at the environment's current cell.
    ///
    /// Only the selected branch of a piecewise expression is evaluated.
    ///
    /// # Errors
    ///
    /// Fails on unbound symbols, missing field values, surviving continuum
    /// derivatives, malformed random keys and modulo by zero.
    pub fn evaluate(&self, env: &Env<'_>) -> Result<f64, ExprError> {
        match self {
            Self::Num(v) => Ok(*v),
            Self::Symbol(s) => env.symbol(s.name()).ok_or_else(|| ExprError::UnboundSymbol {
                name: s.name().to_string(),
            }),
            Self::Access(a) => {
                let cell = shift_cell(env.cell, a.offset);
                env.fields
                    .value(&a.field, a.component, cell)
                    .ok_or_else(|| ExprError::MissingValue {
                        field: a.field.clone(),
                        component: a.component,
                        cell,
                    })
            }
            Self::Counter(axis) => Ok(env.cell[axis.index()] as f64),
            Self::Add(terms) => {
                let mut sum = 0.0;
                for t in terms {
                    sum += t.evaluate(env)?;
                }
                Ok(sum)
            }
            Self::Mul(factors) => {
                let mut product = 1.0;
                for f in factors {
                    product *= f.evaluate(env)?;
                }
                Ok(product)
            }
            Self::Pow(base, exponent) => Ok(base.evaluate(env)?.powf(exponent.evaluate(env)?)),
            Self::Call(func, args) => {
                let values = args
                    .iter()
                    .map(|a| a.evaluate(env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match (func, values.as_slice()) {
                    (Func::Sqrt, [x]) => x.sqrt(),
                    (Func::Abs, [x]) => x.abs(),
                    (Func::Min, [a, b]) => a.min(*b),
                    (Func::Max, [a, b]) => a.max(*b),
                    _ => {
                        return Err(ExprError::BadArity {
                            function: func.name().to_string(),
                            expected: func.arity(),
                            found: values.len(),
                        })
                    }
                })
            }
            Self::Mod(value, modulus) => {
                let m = modulus.evaluate(env)?;
                if m == 0.0 {
                    return Err(ExprError::ModuloByZero);
                }
                Ok(value.evaluate(env)?.rem_euclid(m))
            }
            Self::Diff(_, axis) => Err(ExprError::UndiscretizedDerivative { axis: *axis }),
            Self::Piecewise(cond, then, otherwise) => {
                if cond.evaluate(env)? {
                    then.evaluate(env)
                } else {
                    otherwise.evaluate(env)
                }
            }
            Self::Random(draw) => draw.evaluate(env),
        }
    }
}
