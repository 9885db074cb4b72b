//! Metadata commands: document kinds and card brands.

use anyhow::Result;
use docforge_id::{CardBrand, DocumentKind, MaskSegment};
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    #[tabled(rename = "Code")]
    code: &'static str,

    #[tabled(rename = "Name")]
    name: &'static str,

    #[tabled(rename = "Description")]
    description: &'static str,

    #[tabled(rename = "Digits")]
    lengths: String,

    #[tabled(rename = "Mask")]
    mask: String,
}

#[derive(Debug, Serialize, Tabled)]
struct BrandRow {
    #[tabled(rename = "Code")]
    code: &'static str,

    #[tabled(rename = "Name")]
    name: &'static str,

    #[tabled(rename = "Prefixes")]
    prefixes: String,

    #[tabled(rename = "Digits")]
    lengths: String,

    #[tabled(rename = "CVV")]
    cvv_length: usize,
}

pub fn list_kinds(ctx: CommandContext) -> Result<()> {
    let rows: Vec<KindRow> = DocumentKind::all()
        .iter()
        .map(|kind| {
            let scheme = kind.scheme();
            let masks: Vec<String> = scheme
                .total_lengths()
                .iter()
                .filter_map(|len| scheme.mask_pattern(*len))
                .map(mask_template)
                .collect();
            KindRow {
                code: kind.code(),
                name: kind.label(),
                description: kind.description(),
                lengths: kind.expected_lengths(),
                mask: masks.join(" | "),
            }
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}

pub fn list_brands(ctx: CommandContext) -> Result<()> {
    let rows: Vec<BrandRow> = CardBrand::all()
        .map(|brand| {
            let spec = brand.spec();
            BrandRow {
                code: brand.code(),
                name: spec.name,
                prefixes: join(spec.prefixes),
                lengths: join(spec.lengths),
                cvv_length: spec.cvv_length,
            }
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}

/// Renders a mask with `X` for each digit, e.g. `XXX.XXX.XXX-XX`.
fn mask_template(pattern: &[MaskSegment]) -> String {
    pattern
        .iter()
        .map(|segment| format!("{}{}", "X".repeat(segment.len), segment.separator))
        .collect()
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
