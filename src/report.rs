use crate::engine::Comparison;
use crate::layout::{Layout, Strategy};
use std::fmt::Write;

fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::DeclarationOrder => "declaration order",
        Strategy::SizeMinimizing => "size minimizing",
    }
}

/// Renders a layout as a byte map: one row per field or padding region, in
/// physical order, as half-open byte ranges.
pub fn render_layout(name: &str, layout: &Layout) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "record {} ({}): size {}, align {}",
        name,
        strategy_name(layout.strategy),
        layout.total_size,
        layout.total_alignment
    )
    .unwrap();

    let mut rows: Vec<(u64, u64, &str)> = layout
        .fields
        .iter()
        .map(|f| (f.offset, f.size, f.name.as_str()))
        .collect();
    rows.extend(layout.padding.iter().map(|p| (p.offset, p.length, "padding")));
    rows.sort();

    for (offset, length, label) in rows {
        writeln!(out, "  [{}..{}) {}", offset, offset + length, label).unwrap();
    }

    out
}

/// Renders both layouts of a comparison followed by a one-line verdict.
pub fn render_comparison(name: &str, comparison: &Comparison) -> String {
    let mut out = String::new();

    out.push_str(&render_layout(name, &comparison.declaration));
    out.push_str(&render_layout(name, &comparison.minimized));

    writeln!(
        out,
        "reordering saves {} bytes ({})",
        comparison.bytes_saved,
        if comparison.reordered {
            "fields reordered"
        } else {
            "fields kept in declaration order"
        }
    )
    .unwrap();

    out
}
