//! The named kernel artifacts of an electrokinetics run.
//!
//! [`generate_kernels`] builds every sweep an electrokinetic time step
//! needs, in the order the host engine registers them:
//!
//! | Kernel | Ghost layers | Staggered |
//! |--------|--------------|-----------|
//! | `AdvectionDiffusion` | 1 | yes |
//! | `AdvectionDiffusionFluctuation` | 1 | yes |
//! | `ContinuityEquation` | 1 | no |
//! | `GatherCharges` | 0 | no |
//! | `ReactionContinuity` | 0 | no |
//! | `ReactionFluxSpecies{N}` | 0 | no |
//!
//! Generation is all-or-nothing: the first builder error aborts it.

use indexmap::{IndexMap, IndexSet};

use ekgen_core::{AssignmentCollection, Expr, Field, GenError, Symbol};
use ekgen_kernels::fields::EkFields;
use ekgen_kernels::{
    add_fluctuations, add_ghostlayer_folding, continuity_equation,
    create_advection_diffusion_method, create_reaction_method, domain_extent_symbols,
    gather_charges, reaction_coefficients, reaction_continuity, reaction_orders,
};

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Diffusion coefficient parameter.
pub const DIFFUSION: &str = "D";
/// Valency parameter.
pub const VALENCY: &str = "z";
/// Reaction rate constant parameter.
pub const RATE: &str = "gamma";

// ── Kernel ─────────────────────────────────────────────────────────

/// Sweep metadata consumed by the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelMeta {
    /// Ghost layers the sweep iterates over in addition to the interior.
    pub ghost_layers_to_include: u32,
    /// The sweep writes a staggered flux field.
    pub staggered: bool,
    /// Random keys are folded onto the periodic domain.
    pub folded: bool,
}

/// One named kernel: its assignments, metadata and the fields it touches.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    name: String,
    collection: AssignmentCollection,
    meta: KernelMeta,
    fields: Vec<Field>,
}

impl Kernel {
    /// Assemble a kernel.
    pub fn new(
        name: impl Into<String>,
        collection: AssignmentCollection,
        meta: KernelMeta,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            name: name.into(),
            collection,
            meta,
            fields,
        }
    }

    /// Kernel name, as registered with the host engine.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The update rules.
    pub fn collection(&self) -> &AssignmentCollection {
        &self.collection
    }

    /// Sweep metadata.
    pub fn meta(&self) -> KernelMeta {
        self.meta
    }

    /// Declarations of every field read or written.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Scalar parameters the kernel must be called with.
    pub fn parameters(&self) -> IndexSet<Symbol> {
        self.collection.free_symbols()
    }
}

// ── KernelSet ──────────────────────────────────────────────────────

/// Kernels in generation order, addressable by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KernelSet {
    kernels: IndexMap<String, Kernel>,
}

impl KernelSet {
    fn push(&mut self, kernel: Kernel) {
        log::debug!(
            "generated kernel '{}': {} assignments, {} subexpressions, parameters [{}]",
            kernel.name(),
            kernel.collection().len(),
            kernel.collection().subexpressions().len(),
            kernel
                .parameters()
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.kernels.insert(kernel.name.clone(), kernel);
    }

    /// The kernel called `name`.
    pub fn get(&self, name: &str) -> Option<&Kernel> {
        self.kernels.get(name)
    }

    /// Kernels in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Kernel> {
        self.kernels.values()
    }

    /// Kernel names in generation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kernels.keys().map(String::as_str)
    }

    /// Number of kernels.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl<'a> IntoIterator for &'a KernelSet {
    type Item = &'a Kernel;
    type IntoIter = indexmap::map::Values<'a, String, Kernel>;

    fn into_iter(self) -> Self::IntoIter {
        self.kernels.values()
    }
}

// ── Generation ─────────────────────────────────────────────────────

fn built<T>(kernel: &str, result: Result<T, GenError>) -> Result<T, GenerationError> {
    result.map_err(|source| GenerationError::Build {
        kernel: kernel.to_string(),
        source,
    })
}

/// Field declarations for `config`.
pub fn declare_fields(config: &GenerationConfig) -> EkFields {
    let fields = EkFields::new(config.stencil, config.element, config.layout);
    let depth = |f: Field| f.with_ghost_layers(config.ghost_layers);
    EkFields {
        c: depth(fields.c),
        phi: depth(fields.phi),
        j: depth(fields.j),
        q: depth(fields.q),
        v: depth(fields.v),
        r: depth(fields.r),
    }
}

/// Build every kernel for `config`.
///
/// # Errors
///
/// Returns [`GenerationError::Config`] if `config` fails validation and
/// [`GenerationError::Build`] for the first kernel a builder rejects.
pub fn generate_kernels(config: &GenerationConfig) -> Result<KernelSet, GenerationError> {
    config.validate()?;
    let f = declare_fields(config);
    let d = Expr::symbol(DIFFUSION);
    let z = Expr::symbol(VALENCY);
    let staggered = KernelMeta {
        ghost_layers_to_include: 1,
        staggered: true,
        folded: false,
    };
    let mut set = KernelSet::default();

    let name = "AdvectionDiffusion";
    let flux = built(
        name,
        create_advection_diffusion_method(&f.c, &f.v, &f.phi, &f.j, &d, &z),
    )?;
    let transport_fields = vec![f.c.clone(), f.v.clone(), f.phi.clone(), f.j.clone()];
    set.push(Kernel::new(name, flux.clone(), staggered, transport_fields.clone()));

    let name = "AdvectionDiffusionFluctuation";
    let noisy = built(
        name,
        add_fluctuations(&flux, &f.c, &f.j, &d, config.stencil.noise_factor()),
    )?;
    let folded = add_ghostlayer_folding(&noisy, &domain_extent_symbols());
    set.push(Kernel::new(
        name,
        folded,
        KernelMeta {
            folded: true,
            ..staggered
        },
        transport_fields,
    ));

    let name = "ContinuityEquation";
    let continuity = built(name, continuity_equation(&f.c, &f.phi, &f.j, &d, &z))?;
    set.push(Kernel::new(
        name,
        continuity,
        KernelMeta {
            ghost_layers_to_include: 1,
            ..KernelMeta::default()
        },
        vec![f.c.clone(), f.j.clone()],
    ));

    set.push(Kernel::new(
        "GatherCharges",
        gather_charges(&f.q, &f.c, &z),
        KernelMeta::default(),
        vec![f.q.clone(), f.c.clone()],
    ));

    set.push(Kernel::new(
        "ReactionContinuity",
        reaction_continuity(&f.c, &f.r),
        KernelMeta::default(),
        vec![f.c.clone(), f.r.clone()],
    ));

    let rate = Expr::symbol(RATE);
    for n in config.species_counts.clone() {
        let name = format!("ReactionFluxSpecies{n}");
        let species: Vec<_> = (1..=n).map(|i| f.species(i)).collect();
        let c: Vec<Field> = species
            .iter()
            .map(|s| s.c.clone().with_ghost_layers(config.ghost_layers))
            .collect();
        let r: Vec<Field> = species
            .iter()
            .map(|s| s.r.clone().with_ghost_layers(config.ghost_layers))
            .collect();
        let reaction = built(
            &name,
            create_reaction_method(&c, &r, &rate, &reaction_coefficients(n), &reaction_orders(n)),
        )?;
        set.push(Kernel::new(
            name,
            reaction,
            KernelMeta::default(),
            c.into_iter().chain(r).collect(),
        ));
    }

    log::info!(
        "generated {} kernels for {} ({} {}, {} ghost layer(s))",
        set.len(),
        config.stencil,
        config.element,
        config.layout,
        config.ghost_layers
    );
    Ok(set)
}
