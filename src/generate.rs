//! Row generation for the `generate` and `plan` commands.

use crate::dynamic::DynamicRecord;
use crate::schema::{RecordDefinition, ShapeSchema};
use anyhow::Context;
use clap::Args;
use maker_core::PlanNode;
use maker_generator::{resolver, DelegateRegistry, Maker};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments for `record-maker generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to shape YAML file
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Name of the record to generate
    #[arg(long, short = 'r')]
    pub record: String,

    /// Number of records to generate
    #[arg(long, default_value = "1")]
    pub count: u64,

    /// Random seed (same seed = same data); falls back to the shape file's
    /// seed, then to the current time
    #[arg(long, env = "RECORD_MAKER_SEED")]
    pub seed: Option<i64>,

    /// Plan YAML file to use instead of the shape file's directives
    #[arg(long, value_name = "PATH")]
    pub plan: Option<PathBuf>,
}

/// Arguments for `record-maker plan`.
#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// Path to shape YAML file
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Name of the record to resolve
    #[arg(long, short = 'r')]
    pub record: String,
}

/// Produces records one row at a time.
///
/// Row `i` is filled with its own seed derived from the base seed, so any
/// row can be regenerated without generating the ones before it.
pub struct RowGenerator {
    definition: RecordDefinition,
    maker: Maker,
    seed: i64,
    index: Arc<AtomicU64>,
}

impl RowGenerator {
    /// Create a generator with the built-in delegates registered.
    pub fn new(definition: RecordDefinition, seed: i64, plan: PlanNode) -> Self {
        let index = Arc::new(AtomicU64::new(0));
        let maker = Maker::builder()
            .seed(seed)
            .registry(builtin_delegates(Arc::clone(&index)))
            .plan(plan)
            .build();

        Self {
            definition,
            maker,
            seed,
            index,
        }
    }

    /// Generate the record at `index`.
    ///
    /// Takes `&mut self` because the `index` delegate reads shared state.
    pub fn row(&mut self, index: u64) -> anyhow::Result<DynamicRecord> {
        let mut record = DynamicRecord::from_definition(&self.definition);
        let seed = row_seed(self.seed, index);

        self.index.store(index, Ordering::SeqCst);
        self.maker
            .reseed(seed)
            .fill(&mut record)
            .with_context(|| format!("Failed to fill row {index} of '{}'", self.definition.name))?;

        debug!(index, seed, "Generated row");
        Ok(record)
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }
}

/// Seed for row `index`.
pub fn row_seed(seed: i64, index: u64) -> i64 {
    (seed as u64).wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15)) as i64
}

/// Delegates available to every shape file:
///
/// - `uuid` - random UUID v4
/// - `now` - current UTC time in RFC 3339
/// - `index` - index of the row being generated
pub fn builtin_delegates(index: Arc<AtomicU64>) -> DelegateRegistry {
    DelegateRegistry::new()
        .with("uuid", || uuid::Uuid::new_v4().to_string())
        .with("now", || chrono::Utc::now().to_rfc3339())
        .with("index", move || index.load(Ordering::SeqCst).to_string())
}

/// Derive the plan for a record definition from its directives.
pub fn derive_plan(definition: &RecordDefinition) -> anyhow::Result<PlanNode> {
    let mut template = DynamicRecord::from_definition(definition);
    resolver::resolve(&mut template)
        .with_context(|| format!("Failed to resolve plan for '{}'", definition.name))
}

/// Run `record-maker generate`, writing one JSON document per line.
pub fn run_generate<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<()> {
    let schema = ShapeSchema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {}", args.schema.display()))?;
    let definition = schema.get_record(&args.record)?.clone();

    let plan = match &args.plan {
        Some(path) => PlanNode::from_file(path)
            .with_context(|| format!("Failed to load plan from {}", path.display()))?,
        None => derive_plan(&definition)?,
    };

    let seed = args
        .seed
        .or(schema.seed)
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    info!(
        record = %args.record,
        count = args.count,
        seed,
        leaves = plan.leaf_count(),
        "Generating records"
    );

    let mut generator = RowGenerator::new(definition, seed, plan);
    for index in 0..args.count {
        let record = generator.row(index)?;
        serde_json::to_writer(&mut *out, &record.to_json())
            .context("Failed to write record")?;
        writeln!(out).context("Failed to write record")?;
    }
    out.flush().context("Failed to flush output")?;

    info!(record = %args.record, count = args.count, "Generated records");
    Ok(())
}

/// Run `record-maker plan`, writing the derived plan as YAML.
pub fn run_plan<W: Write>(args: &PlanArgs, out: &mut W) -> anyhow::Result<()> {
    let schema = ShapeSchema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {}", args.schema.display()))?;
    let plan = derive_plan(schema.get_record(&args.record)?)?;

    out.write_all(plan.to_yaml()?.as_bytes())
        .context("Failed to write plan")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::DynamicValue;

    const SHAPE: &str = r#"
seed: 7
records:
  - name: event
    fields:
      - name: row
        type: uint
        directive: "func[index]"
      - name: id
        type: string
        directive: "func[uuid]"
      - name: at
        type: string
        directive: "func[now]"
      - name: score
        type: int
        directive: "rand[1;100;1]"
"#;

    fn event() -> RecordDefinition {
        ShapeSchema::from_yaml(SHAPE)
            .unwrap()
            .get_record("event")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_row_seed() {
        assert_eq!(row_seed(42, 0), 42);
        assert_ne!(row_seed(42, 1), row_seed(42, 2));
        assert_eq!(
            row_seed(-1, 1),
            (u64::MAX.wrapping_add(0x9E3779B97F4A7C15)) as i64
        );
    }

    #[test]
    fn test_builtin_delegates() {
        let index = Arc::new(AtomicU64::new(5));
        let registry = builtin_delegates(Arc::clone(&index));

        assert_eq!(registry.names(), vec!["index", "now", "uuid"]);
        assert_eq!(registry.get("index").map(|f| f()), Some("5".to_string()));

        index.store(9, Ordering::SeqCst);
        assert_eq!(registry.get("index").map(|f| f()), Some("9".to_string()));

        let id = registry.get("uuid").map(|f| f()).unwrap();
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let now = registry.get("now").map(|f| f()).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_rows_carry_their_index() {
        let definition = event();
        let mut generator =
            RowGenerator::new(definition.clone(), 7, derive_plan(&definition).unwrap());

        for index in [0, 3, 11] {
            let record = generator.row(index).unwrap();
            assert_eq!(record.get("row"), Some(&DynamicValue::Uint(index)));
        }
    }

    #[test]
    fn test_rows_are_reproducible() {
        let definition = event();
        let plan = derive_plan(&definition).unwrap();
        let mut first = RowGenerator::new(definition.clone(), 7, plan.clone());
        let mut second = RowGenerator::new(definition, 7, plan);

        assert_eq!(first.row(4).unwrap().get("score"), second.row(4).unwrap().get("score"));
    }

    #[test]
    fn test_derive_plan_skips_untagged() {
        let definition = RecordDefinition {
            name: "plain".to_string(),
            fields: vec![crate::schema::FieldDefinition::new(
                "note",
                crate::schema::FieldShape::String,
                None,
            )],
        };

        let plan = derive_plan(&definition).unwrap();
        assert_eq!(plan.leaf_count(), 0);
    }
}
