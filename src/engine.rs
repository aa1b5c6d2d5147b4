use crate::error::Error;
use crate::field::FieldDescriptor;
use crate::layout::{Layout, LayoutCursor, PlacedField, Strategy};
use serde::Serialize;

/// Computes the layout of `fields` under `strategy`. Pure: the same inputs
/// always produce the same `Layout`, including tie-breaks among fields of
/// equal alignment.
pub fn compute(fields: &[FieldDescriptor], strategy: Strategy) -> Result<Layout, Error> {
    let mut order: Vec<usize> = (0..fields.len()).collect();

    if let Strategy::SizeMinimizing = strategy {
        // Largest alignment first, so no field is ever forced past a gap a
        // bigger neighbour's alignment would open. The sort is stable:
        // fields sharing an alignment keep declaration order, which makes
        // the output deterministic.
        order.sort_by(|&a, &b| fields[b].alignment().cmp(&fields[a].alignment()));
    }

    let total_alignment = fields.iter().map(|f| f.alignment()).max().unwrap_or(1);

    let mut cursor = LayoutCursor::new();
    let mut offsets = vec![0u64; fields.len()];

    for &i in &order {
        offsets[i] = cursor.place(&fields[i])?;
    }

    let (total_size, padding) = cursor.finish(total_alignment)?;

    let placed = fields
        .iter()
        .zip(&offsets)
        .map(|(field, &offset)| PlacedField {
            name: field.name().to_string(),
            offset,
            size: field.size(),
            alignment: field.alignment(),
        })
        .collect();

    Ok(Layout {
        strategy,
        total_size,
        total_alignment,
        fields: placed,
        padding,
    })
}

#[derive(PartialEq, Debug, Clone, Eq, Serialize)]
pub struct Comparison {
    pub declaration: Layout,
    pub minimized: Layout,
    pub bytes_saved: u64,
    pub reordered: bool,
}

/// Runs both strategies over the same fields and reports how much the
/// size-minimizing one saves, and whether it actually moved anything.
pub fn compare(fields: &[FieldDescriptor]) -> Result<Comparison, Error> {
    let declaration = compute(fields, Strategy::DeclarationOrder)?;
    let minimized = compute(fields, Strategy::SizeMinimizing)?;

    let bytes_saved = declaration.total_size - minimized.total_size;
    let reordered = physical_order(&minimized) != physical_order(&declaration);

    Ok(Comparison {
        declaration,
        minimized,
        bytes_saved,
        reordered,
    })
}

fn physical_order(layout: &Layout) -> Vec<&str> {
    let mut fields: Vec<(u64, &str)> = layout
        .fields
        .iter()
        .map(|f| (f.offset, f.name.as_str()))
        .collect();
    fields.sort_by_key(|&(offset, _)| offset);
    fields.into_iter().map(|(_, name)| name).collect()
}

#[derive(PartialEq, Debug, Clone, Eq)]
pub enum InvariantViolation {
    MisalignedField {
        field: String,
        offset: u64,
        alignment: u64,
    },
    OverlappingFields {
        first: String,
        second: String,
    },
    WrongTotalAlignment {
        expected: u64,
        actual: u64,
    },
    UnroundedTotalSize {
        total_size: u64,
        total_alignment: u64,
    },
    PaddingMismatch {
        field_bytes: u64,
        padding_bytes: u64,
        total_size: u64,
    },
    BrokenTiling {
        offset: u64,
    },
}

/// Re-checks a `Layout` against every invariant `compute` promises,
/// independently of how the layout was produced. Returns the empty vec for
/// a valid layout. Intended as a diagnostic oracle; `compute` never emits a
/// layout that fails it.
pub fn validate(layout: &Layout) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for field in &layout.fields {
        if field.alignment == 0 || field.offset % field.alignment != 0 {
            violations.push(InvariantViolation::MisalignedField {
                field: field.name.clone(),
                offset: field.offset,
                alignment: field.alignment,
            });
        }
    }

    let mut by_offset: Vec<&PlacedField> = layout.fields.iter().collect();
    by_offset.sort_by_key(|field| field.offset);

    for pair in by_offset.windows(2) {
        if pair[0].end() > pair[1].offset {
            violations.push(InvariantViolation::OverlappingFields {
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
    }

    let expected = layout.fields.iter().map(|f| f.alignment).max().unwrap_or(1);
    if layout.total_alignment != expected {
        violations.push(InvariantViolation::WrongTotalAlignment {
            expected,
            actual: layout.total_alignment,
        });
    }

    if layout.total_alignment == 0 || layout.total_size % layout.total_alignment != 0 {
        violations.push(InvariantViolation::UnroundedTotalSize {
            total_size: layout.total_size,
            total_alignment: layout.total_alignment,
        });
    }

    let field_bytes: u64 = layout.fields.iter().map(|f| f.size).sum();
    let padding_bytes: u64 = layout.padding.iter().map(|p| p.length).sum();

    if layout.total_size < field_bytes || layout.total_size - field_bytes != padding_bytes {
        violations.push(InvariantViolation::PaddingMismatch {
            field_bytes,
            padding_bytes,
            total_size: layout.total_size,
        });
    }

    // Fields and padding together must tile [0, total_size) exactly, with
    // no gaps and no overlap between the two kinds of region.
    let mut regions: Vec<(u64, u64)> = layout
        .fields
        .iter()
        .map(|f| (f.offset, f.size))
        .chain(layout.padding.iter().map(|p| (p.offset, p.length)))
        .collect();
    regions.sort();

    let mut end = 0u64;
    let mut broken_at = None;

    for (offset, length) in regions {
        if offset != end {
            broken_at = Some(end);
            break;
        }
        end = end.saturating_add(length);
    }

    if broken_at.is_none() && end != layout.total_size {
        broken_at = Some(end);
    }

    if let Some(offset) = broken_at {
        violations.push(InvariantViolation::BrokenTiling { offset });
    }

    violations
}
