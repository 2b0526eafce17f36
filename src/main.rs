//! # Minuta CLI
//!
//! Usage:
//!   minuta record.json -o contract.pdf
//!   echo '{ ... }' | minuta
//!   minuta --example > record.json
//!
//! Without `-o`, the output name follows the
//! `{contract|quotation}_{client}_{ISO date}.pdf` convention.

use std::env;
use std::fs;
use std::io::{self, Read};

use minuta::model::{suggested_filename, DocumentRecord};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minuta=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_record_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        match fs::read_to_string(&args[1]) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("✗ Failed to read {}: {}", args[1], e);
                std::process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("✗ Failed to read stdin: {}", e);
            std::process::exit(1);
        }
        buf
    };

    let record: DocumentRecord = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to parse document record: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = record.validate() {
        eprintln!("✗ Invalid record: {}", e);
        std::process::exit(1);
    }

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| suggested_filename(&record, chrono::Local::now().date_naive()));

    let pdf_bytes = minuta::render(&record);
    match fs::write(&output_path, &pdf_bytes) {
        Ok(()) => eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path),
        Err(e) => {
            eprintln!("✗ Failed to write {}: {}", output_path, e);
            std::process::exit(1);
        }
    }
}

fn example_record_json() -> &'static str {
    r##"{
  "clientName": "Maria Silva",
  "clientDocument": "123.456.789-00",
  "clientAddress": "Rua das Flores, 100 - São Paulo/SP",
  "clientPhone": "11999999999",
  "clientEmail": "maria@example.com",
  "documentKind": "contract",
  "documentDate": "2026-08-25",
  "services": [
    { "id": "1", "description": "Hospedagem anual", "value": 1200.00, "discount": 100.00 },
    { "id": "2", "description": "Desenvolvimento de site institucional", "value": 4500.00, "discount": 0.00 },
    { "id": "3", "description": "Gestão de tráfego pago (mensal)", "value": 800.00, "discount": 50.00 }
  ]
}"##
}
