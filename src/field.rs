use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A size and alignment pair, both in bytes.
#[derive(PartialEq, Debug, Clone, Copy, Hash, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    pub size: u64,
    pub alignment: u64,
}

impl TypeShape {
    pub fn new(size: u64, alignment: u64) -> TypeShape {
        TypeShape { size, alignment }
    }

    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.alignment > 0 && self.alignment.is_power_of_two()
    }
}

/// A named field with a known concrete shape. Only constructible through
/// `new`, which rejects invalid shapes, so a descriptor in hand is always
/// safe to lay out.
#[derive(PartialEq, Debug, Clone, Eq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    shape: TypeShape,
}

impl FieldDescriptor {
    pub fn new(name: &str, size: u64, alignment: u64) -> Result<FieldDescriptor, Error> {
        let shape = TypeShape::new(size, alignment);

        if !shape.is_valid() {
            return Err(Error::InvalidDescriptor {
                field: name.to_string(),
                size,
                alignment,
            });
        }

        Ok(FieldDescriptor {
            name: name.to_string(),
            shape,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.shape.size
    }

    pub fn alignment(&self) -> u64 {
        self.shape.alignment
    }

    pub fn shape(&self) -> TypeShape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_descriptor() {
        let d = FieldDescriptor::new("x", 4, 4).unwrap();

        assert_eq!(d.name(), "x");
        assert_eq!(d.size(), 4);
        assert_eq!(d.alignment(), 4);
    }

    #[test]
    fn non_power_of_two_alignment_is_rejected() {
        let err = FieldDescriptor::new("w", 4, 3).unwrap_err();

        assert_eq!(
            err,
            Error::InvalidDescriptor {
                field: "w".to_string(),
                size: 4,
                alignment: 3,
            }
        );
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(FieldDescriptor::new("z", 0, 1).is_err());
    }

    #[test]
    fn zero_alignment_is_rejected() {
        assert!(FieldDescriptor::new("z", 8, 0).is_err());
    }
}
