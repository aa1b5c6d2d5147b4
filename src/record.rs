use crate::field::TypeShape;
use serde::{Deserialize, Serialize};

/// The type of a record field: either an already resolved shape, or a
/// reference to one of the record's type parameters.
#[derive(PartialEq, Debug, Clone, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Concrete(TypeShape),
    Param(String),
}

#[derive(PartialEq, Debug, Clone, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub name: String,
    pub ty: FieldType,
}

impl RecordField {
    pub fn concrete(name: &str, size: u64, alignment: u64) -> RecordField {
        RecordField {
            name: name.to_string(),
            ty: FieldType::Concrete(TypeShape::new(size, alignment)),
        }
    }

    pub fn param(name: &str, param: &str) -> RecordField {
        RecordField {
            name: name.to_string(),
            ty: FieldType::Param(param.to_string()),
        }
    }
}

/// An ordered sequence of named fields, possibly generic over type
/// parameters. Field order is memory order only under the declaration-order
/// strategy; the size-minimizing strategy treats it as naming order alone.
#[derive(PartialEq, Debug, Clone, Eq, Serialize, Deserialize)]
pub struct RecordDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub fields: Vec<RecordField>,
}

impl RecordDef {
    pub fn new(name: &str, fields: Vec<RecordField>) -> RecordDef {
        RecordDef {
            name: name.to_string(),
            params: Vec::new(),
            fields,
        }
    }

    pub fn generic(name: &str, params: &[&str], fields: Vec<RecordField>) -> RecordDef {
        RecordDef {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            fields,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f.ty, FieldType::Param(_)))
    }
}
