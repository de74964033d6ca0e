//! The `Maker` entry point and its builder.

use crate::error::MakerError;
use crate::filler::Filler;
use crate::registry::DelegateRegistry;
use crate::resolver;
use maker_core::{PlanNode, Record, Slot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Fills records with synthetic values.
///
/// Every fill draws from a fresh stream seeded with the maker's seed, so a
/// maker can be shared across threads and two fills of identical targets
/// produce identical values.
///
/// Without an explicit plan, the plan is derived from the first record filled
/// and reused afterwards. Use one maker per record type in that case.
#[derive(Clone)]
pub struct Maker {
    seed: i64,
    registry: Arc<DelegateRegistry>,
    plan: Option<Arc<PlanNode>>,
    derived: OnceLock<Arc<PlanNode>>,
}

impl Maker {
    /// Create a maker seeded with the current time.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a maker with a fixed seed.
    pub fn with_seed(seed: i64) -> Self {
        Self::builder().seed(seed).build()
    }

    pub fn builder() -> MakerBuilder {
        MakerBuilder::default()
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn registry(&self) -> &DelegateRegistry {
        &self.registry
    }

    /// The explicit plan, or the derived one once a fill has happened.
    pub fn plan(&self) -> Option<&PlanNode> {
        self.plan
            .as_deref()
            .or_else(|| self.derived.get().map(Arc::as_ref))
    }

    /// A maker with a different seed sharing this maker's registry and plan.
    pub fn reseed(&self, seed: i64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Fill `target` in place.
    pub fn fill<R: Record>(&self, target: &mut R) -> Result<(), MakerError> {
        self.fill_record(target)
    }

    /// Fill a record behind a trait object.
    pub fn fill_record(&self, target: &mut dyn Record) -> Result<(), MakerError> {
        let plan = self.resolve_plan(target)?;
        let mut filler = Filler::new(StdRng::seed_from_u64(self.seed as u64), &self.registry);

        debug!(seed = self.seed, leaves = plan.leaf_count(), "Filling record");
        filler.fill_record(target, &plan)?;
        debug!(seed = self.seed, "Record filled");
        Ok(())
    }

    /// Fill a slot that must hold a record.
    pub fn fill_slot(&self, target: Slot<'_>) -> Result<(), MakerError> {
        match target {
            Slot::Record(record) => self.fill_record(record),
            other => Err(MakerError::NonPointerArgument {
                found: other.kind_name(),
            }),
        }
    }

    /// The plan used for `target`: the explicit one, the cached derived one,
    /// or a freshly derived one.
    pub fn resolve_plan(&self, target: &mut dyn Record) -> Result<Arc<PlanNode>, MakerError> {
        if let Some(plan) = &self.plan {
            return Ok(Arc::clone(plan));
        }
        if let Some(plan) = self.derived.get() {
            debug!("Reusing derived plan");
            return Ok(Arc::clone(plan));
        }

        let plan = Arc::new(resolver::resolve(target)?);
        debug!(leaves = plan.leaf_count(), "Derived plan from record");
        Ok(Arc::clone(self.derived.get_or_init(|| plan)))
    }
}

impl Default for Maker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Maker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maker")
            .field("seed", &self.seed)
            .field("registry", &self.registry)
            .field("plan", &self.plan())
            .finish()
    }
}

/// Builder for [`Maker`].
#[derive(Default)]
pub struct MakerBuilder {
    seed: Option<i64>,
    registry: DelegateRegistry,
    plan: Option<PlanNode>,
}

impl MakerBuilder {
    /// Seed for every fill. Defaults to the Unix time at `build()`.
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the delegate registry.
    pub fn registry(mut self, registry: DelegateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a single delegate.
    pub fn delegate<F>(mut self, name: impl Into<String>, delegate: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.registry.register(name, delegate);
        self
    }

    /// Use `plan` instead of deriving one from directive tags.
    pub fn plan(mut self, plan: PlanNode) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn build(self) -> Maker {
        Maker {
            seed: self.seed.unwrap_or_else(|| chrono::Utc::now().timestamp()),
            registry: Arc::new(self.registry),
            plan: self.plan.map(Arc::new),
            derived: OnceLock::new(),
        }
    }
}
