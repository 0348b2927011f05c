// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! reflect-dump - Inspect save-state documents
//!
//! Parses a serialized struct document and prints it as an annotated tree or
//! as JSON. Embedded documents keyed `"0".."n-1"` are shown as arrays.

use anyhow::Context;
use clap::Parser;
use colored::*;
use machine_reflect::{Document, Element};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Inspect save-state documents
#[derive(Parser, Debug)]
#[command(name = "reflect-dump")]
#[command(version)]
#[command(about = "Dump a serialized struct document")]
struct Args {
    /// Document file, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Single-line output
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let bytes = read_input(&args.input)?;
    let document = Document::from_bytes(&bytes)
        .with_context(|| format!("{} is not a valid document", args.input.display()))?;

    match args.format {
        OutputFormat::Json => {
            let json = to_json(&document);
            let text = if args.compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };
            println!("{}", text);
        }
        OutputFormat::Pretty => {
            if !args.compact {
                eprintln!(
                    "{} {} ({} bytes, {} fields)",
                    ">>>".green().bold(),
                    args.input.display(),
                    bytes.len(),
                    document.len()
                );
            }
            print!("{}", render_pretty(&document, args.compact));
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Check whether a document holds array elements keyed `"0".."n-1"`.
fn is_array_like(document: &Document) -> bool {
    !document.is_empty()
        && document
            .keys()
            .enumerate()
            .all(|(i, key)| key == i.to_string())
}

fn to_json(document: &Document) -> serde_json::Value {
    if is_array_like(document) {
        return serde_json::Value::Array(document.iter().map(|(_, e)| element_json(e)).collect());
    }
    let map = document
        .iter()
        .map(|(key, e)| (key.to_string(), element_json(e)))
        .collect();
    serde_json::Value::Object(map)
}

fn element_json(element: &Element) -> serde_json::Value {
    match element {
        Element::Double(v) => serde_json::Number::from_f64(*v)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Element::String(s) => serde_json::Value::String(s.clone()),
        Element::Document(d) | Element::Array(d) => to_json(d),
        Element::Boolean(b) => serde_json::Value::Bool(*b),
        Element::Int32(v) => serde_json::Value::from(*v),
        Element::Int64(v) => serde_json::Value::from(*v),
    }
}

fn render_pretty(document: &Document, compact: bool) -> String {
    let mut out = String::new();
    if compact {
        render_inline(&mut out, document);
        out.push('\n');
    } else {
        render_tree(&mut out, document, 0);
    }
    out
}

fn render_tree(out: &mut String, document: &Document, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, element) in document.iter() {
        let label = format!("({})", element.type_name()).dimmed();
        match element.as_document() {
            Some(child) => {
                out.push_str(&format!("{}{} {}\n", indent, key.cyan().bold(), label));
                render_tree(out, child, depth + 1);
            }
            None => out.push_str(&format!(
                "{}{} {} = {}\n",
                indent,
                key.cyan(),
                label,
                scalar_text(element)
            )),
        }
    }
}

fn render_inline(out: &mut String, document: &Document) {
    let array = is_array_like(document);
    out.push(if array { '[' } else { '{' });
    for (i, (key, element)) in document.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !array {
            out.push_str(&format!("{}: ", key.cyan()));
        }
        match element.as_document() {
            Some(child) => render_inline(out, child),
            None => out.push_str(&scalar_text(element)),
        }
    }
    out.push(if array { ']' } else { '}' });
}

fn scalar_text(element: &Element) -> String {
    match element {
        Element::Double(v) => v.to_string().yellow().to_string(),
        Element::String(s) => format!("{:?}", s).green().to_string(),
        Element::Boolean(b) => b.to_string().magenta().to_string(),
        Element::Int32(v) => v.to_string().yellow().to_string(),
        Element::Int64(v) => v.to_string().yellow().to_string(),
        Element::Document(_) | Element::Array(_) => String::new(),
    }
}
