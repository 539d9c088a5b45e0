use schemacanvas::layout::relation_anchor_points;
use schemacanvas::measure::TableMetrics;
use schemacanvas::model::DatabaseSchema;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema.json> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let schema: DatabaseSchema = match serde_json::from_str(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid schema JSON: {}", e);
            process::exit(1);
        }
    };

    let metrics = TableMetrics::default();
    let mut report = String::new();

    for table in &schema.tables {
        let _ = writeln!(
            report,
            "table {} at ({}, {}) height {}",
            table.table_name,
            table.x,
            table.y,
            metrics.table_height(table)
        );
    }

    for relation in &schema.relations {
        match relation_anchor_points(&schema, relation, &metrics) {
            Some(anchors) => {
                let _ = writeln!(
                    report,
                    "relation {} [{}]: ({}, {}) -> ({}, {})",
                    relation.id,
                    relation.kind,
                    anchors.origin.x,
                    anchors.origin.y,
                    anchors.destination.x,
                    anchors.destination.y
                );
            }
            None => {
                let _ = writeln!(report, "relation {}: unresolved endpoints", relation.id);
            }
        }
    }

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &report) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", report),
    }
}
