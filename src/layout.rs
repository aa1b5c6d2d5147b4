use crate::error::Error;
use crate::field::FieldDescriptor;
use serde::Serialize;

/// The two layout strategies. A closed set: declaration order is what
/// foreign-interop representations require, size minimizing is what a
/// compiler free to reorder fields would pick.
#[derive(PartialEq, Debug, Clone, Copy, Eq, Serialize)]
pub enum Strategy {
    DeclarationOrder,
    SizeMinimizing,
}

/// Rounds `value` up to the next multiple of `align`. Returns None if the
/// rounded value does not fit in a u64.
pub fn align_to(value: u64, align: u64) -> Option<u64> {
    debug_assert!(align.is_power_of_two());
    Some(value.checked_add(align - 1)? & !(align - 1))
}

#[derive(PartialEq, Debug, Clone, Eq, Serialize)]
pub struct PlacedField {
    pub name: String,
    pub offset: u64,
    pub size: u64,
    pub alignment: u64,
}

impl PlacedField {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

#[derive(PartialEq, Debug, Clone, Copy, Eq, Serialize)]
pub struct PaddingRegion {
    pub offset: u64,
    pub length: u64,
}

/// The complete layout of one record under one strategy. `fields` is always
/// reported in declaration order, whatever the physical placement, so the
/// two strategies' outputs compare field for field. `padding` is sorted by
/// ascending offset; fields and padding together tile `[0, total_size)`
/// exactly.
#[derive(PartialEq, Debug, Clone, Eq, Serialize)]
pub struct Layout {
    pub strategy: Strategy,
    pub total_size: u64,
    pub total_alignment: u64,
    pub fields: Vec<PlacedField>,
    pub padding: Vec<PaddingRegion>,
}

/// Running placement cursor. Hands out one aligned offset per field and
/// records every padding gap the alignment rounding introduces.
pub struct LayoutCursor {
    position: u64,
    padding: Vec<PaddingRegion>,
}

impl LayoutCursor {
    pub fn new() -> LayoutCursor {
        LayoutCursor {
            position: 0,
            padding: Vec::new(),
        }
    }

    /// Aligns the cursor for `field`, returns the offset the field was
    /// placed at, and advances past it.
    pub fn place(&mut self, field: &FieldDescriptor) -> Result<u64, Error> {
        let offset = align_to(self.position, field.alignment()).ok_or(Error::LayoutOverflow)?;

        if offset > self.position {
            self.padding.push(PaddingRegion {
                offset: self.position,
                length: offset - self.position,
            });
        }

        self.position = offset.checked_add(field.size()).ok_or(Error::LayoutOverflow)?;

        Ok(offset)
    }

    /// Rounds the cursor up to `alignment` and returns the final size
    /// together with all padding regions, including the trailing one the
    /// rounding may have introduced.
    pub fn finish(mut self, alignment: u64) -> Result<(u64, Vec<PaddingRegion>), Error> {
        let total_size = align_to(self.position, alignment).ok_or(Error::LayoutOverflow)?;

        if total_size > self.position {
            self.padding.push(PaddingRegion {
                offset: self.position,
                length: total_size - self.position,
            });
        }

        Ok((total_size, self.padding))
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_to_basics() {
        assert_eq!(align_to(0, 1), Some(0));
        assert_eq!(align_to(0, 8), Some(0));
        assert_eq!(align_to(1, 8), Some(8));
        assert_eq!(align_to(8, 8), Some(8));
        assert_eq!(align_to(9, 4), Some(12));
    }

    #[test]
    fn align_to_overflow() {
        assert_eq!(align_to(u64::MAX, 2), None);
        assert_eq!(align_to(u64::MAX, 1), Some(u64::MAX));
    }

    #[test]
    fn cursor_places_and_records_gaps() {
        let a = FieldDescriptor::new("a", 2, 2).unwrap();
        let b = FieldDescriptor::new("b", 8, 8).unwrap();

        let mut cursor = LayoutCursor::new();

        assert_eq!(cursor.place(&a).unwrap(), 0);
        assert_eq!(cursor.place(&b).unwrap(), 8);

        let (size, padding) = cursor.finish(8).unwrap();

        assert_eq!(size, 16);
        assert_eq!(
            padding,
            vec![PaddingRegion {
                offset: 2,
                length: 6,
            }]
        );
    }

    #[test]
    fn cursor_trailing_padding() {
        let a = FieldDescriptor::new("a", 8, 8).unwrap();
        let b = FieldDescriptor::new("b", 1, 1).unwrap();

        let mut cursor = LayoutCursor::new();
        cursor.place(&a).unwrap();
        cursor.place(&b).unwrap();

        let (size, padding) = cursor.finish(8).unwrap();

        assert_eq!(size, 16);
        assert_eq!(
            padding,
            vec![PaddingRegion {
                offset: 9,
                length: 7,
            }]
        );
    }

    #[test]
    fn cursor_overflow() {
        let a = FieldDescriptor::new("a", 8, 8).unwrap();
        let b = FieldDescriptor::new("b", u64::MAX, 8).unwrap();

        let mut cursor = LayoutCursor::new();
        cursor.place(&a).unwrap();

        assert_eq!(cursor.place(&b), Err(Error::LayoutOverflow));
    }
}
