use crate::error::Error;
use crate::field::{FieldDescriptor, TypeShape};
use crate::record::{FieldType, RecordDef};
use std::collections::HashMap;

/// Maps a type parameter name to the shape it stands for in one
/// instantiation.
pub type Substitution = HashMap<String, TypeShape>;

/// Replaces every parametric field of `record` with the shape its parameter
/// maps to under `subst`, leaving concrete fields untouched and preserving
/// declaration order. Every resulting shape, substituted or not, goes
/// through descriptor validation.
///
/// The output is what the layout engine consumes. Layouts must be computed
/// per instantiation: two substitutions of the same record can have
/// different optimal physical orders, so a minimized layout cached against
/// the generic definition alone would be wrong.
pub fn resolve(record: &RecordDef, subst: &Substitution) -> Result<Vec<FieldDescriptor>, Error> {
    let mut fields = Vec::with_capacity(record.fields.len());

    for field in &record.fields {
        let shape = match &field.ty {
            FieldType::Concrete(shape) => *shape,
            FieldType::Param(param) => match subst.get(param) {
                Some(shape) => *shape,
                None => {
                    return Err(Error::UnresolvedParameter {
                        record: record.name.clone(),
                        field: field.name.clone(),
                        param: param.clone(),
                    });
                }
            },
        };

        fields.push(FieldDescriptor::new(&field.name, shape.size, shape.alignment)?);
    }

    Ok(fields)
}
