//! Shape file -> dynamic record -> fill -> JSON lines.

use record_maker::generate::{derive_plan, run_generate, run_plan, RowGenerator};
use record_maker::{GenerateArgs, PlanArgs, ShapeSchema};
use regex::Regex;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const SHAPES: &str = "tests/fixtures/shapes.yaml";

fn generate_args(count: u64, seed: Option<i64>) -> GenerateArgs {
    GenerateArgs {
        schema: PathBuf::from(SHAPES),
        record: "order".to_string(),
        count,
        seed,
        plan: None,
    }
}

fn generate_lines(args: &GenerateArgs) -> Vec<Value> {
    let mut out = Vec::new();
    run_generate(args, &mut out).expect("generation should succeed");

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_generate_fills_every_tagged_field() {
    let reference = Regex::new(r"^[A-Z]{2}-[0-9]{6}$").unwrap();
    let email = Regex::new(r"^[a-z]{3,10}@example\.(com|org)$").unwrap();
    let sku = Regex::new(r"^SKU-[0-9]{4}$").unwrap();

    let rows = generate_lines(&generate_args(5, None));
    assert_eq!(rows.len(), 5);

    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["row"], index as u64);

        let id = row["id"].as_u64().unwrap();
        assert!((1..100000).contains(&id));
        assert!(reference.is_match(row["reference"].as_str().unwrap()));
        assert!(row["paid"].is_boolean());
        assert_eq!(row["note"], "");

        let customer = &row["customer"];
        assert!(email.is_match(customer["email"].as_str().unwrap()));
        let age = customer["age"].as_i64().unwrap();
        assert!((18..90).contains(&age));

        let lines = row["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert!(sku.is_match(line["sku"].as_str().unwrap()));
            let quantity = line["quantity"].as_i64().unwrap();
            assert!((1..20).contains(&quantity));
        }

        let weights = row["weights"].as_array().unwrap();
        assert_eq!(weights.len(), 4);
        assert!(weights
            .iter()
            .all(|w| (0.0..10.0).contains(&w.as_f64().unwrap())));
    }
}

#[test]
fn test_same_seed_same_output() {
    let first = generate_lines(&generate_args(3, Some(99)));
    let second = generate_lines(&generate_args(3, Some(99)));
    let other = generate_lines(&generate_args(3, Some(100)));

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn test_shape_file_seed_is_default() {
    let from_file = generate_lines(&generate_args(2, None));
    let explicit = generate_lines(&generate_args(2, Some(42)));

    assert_eq!(from_file, explicit);
}

#[test]
fn test_rows_differ_from_each_other() {
    let rows = generate_lines(&generate_args(4, Some(1)));
    let references: std::collections::HashSet<&str> = rows
        .iter()
        .map(|row| row["reference"].as_str().unwrap())
        .collect();

    assert!(references.len() > 1);
}

#[test]
fn test_plan_round_trip() {
    let mut yaml = Vec::new();
    run_plan(
        &PlanArgs {
            schema: PathBuf::from(SHAPES),
            record: "order".to_string(),
        },
        &mut yaml,
    )
    .unwrap();
    let yaml = String::from_utf8(yaml).unwrap();
    assert!(yaml.contains("func[index]"));
    assert!(!yaml.contains("note"));

    let mut plan_file = NamedTempFile::new().unwrap();
    plan_file.write_all(yaml.as_bytes()).unwrap();

    let mut args = generate_args(3, Some(5));
    let derived = generate_lines(&args);
    args.plan = Some(plan_file.path().to_path_buf());
    let from_plan = generate_lines(&args);

    assert_eq!(derived, from_plan);
}

#[test]
fn test_explicit_plan_overrides_directives() {
    let mut plan_file = NamedTempFile::new().unwrap();
    write!(plan_file, "id: \"rand[7;7;1]\"\nnote: \"regex[fixed]\"\n").unwrap();

    let mut args = generate_args(2, Some(5));
    args.plan = Some(plan_file.path().to_path_buf());

    for row in generate_lines(&args) {
        assert_eq!(row["id"], 7);
        assert_eq!(row["note"], "fixed");
        // Fields missing from the plan stay zeroed
        assert_eq!(row["reference"], "");
    }
}

#[test]
fn test_empty_record_sequence_fails() {
    let schema = ShapeSchema::from_file(SHAPES).unwrap();
    let err = derive_plan(schema.get_record("broken").unwrap()).unwrap_err();

    assert!(format!("{err:#}").contains("sequence of records is empty"));
}

#[test]
fn test_unknown_record_fails() {
    let mut args = generate_args(1, Some(1));
    args.record = "missing".to_string();

    let err = run_generate(&args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("Record not found: missing"));
}

#[test]
fn test_row_generator_regenerates_any_row() {
    let schema = ShapeSchema::from_file(SHAPES).unwrap();
    let definition = schema.get_record("order").unwrap().clone();
    let plan = derive_plan(&definition).unwrap();

    let mut sequential = RowGenerator::new(definition.clone(), 42, plan.clone());
    let rows: Vec<Value> = (0..4)
        .map(|index| sequential.row(index).unwrap().to_json())
        .collect();

    let mut direct = RowGenerator::new(definition, 42, plan);
    assert_eq!(direct.row(3).unwrap().to_json(), rows[3]);
}
