//! Parameter-name recovery from the `LocalVariableTable` debug attribute.

use std::collections::BTreeMap;

use log::debug;

use crate::model::class_file::constant_pool::ConstantPool;
use crate::model::class_file::{AttributeInfo, MethodInfo};

/// Collects the names of locals that are live at the method's entry
/// (bytecode offset 0), keyed by local-variable slot and restricted to
/// `slot <= max_slot`, the method's parameter slot range.
///
/// The table is optional debug metadata, so everything here degrades:
/// a method without a `Code` attribute or without the table yields an empty
/// map, and an entry whose name does not resolve is skipped on its own.
pub fn parameter_names(
    method: &MethodInfo,
    constant_pool: &ConstantPool,
    max_slot: u16,
) -> BTreeMap<u16, String> {
    let mut names = BTreeMap::new();
    let code_attributes = method.attributes.iter().find_map(|attr| match attr {
        AttributeInfo::Code { attributes, .. } => Some(attributes),
        _ => None,
    });
    let Some(code_attributes) = code_attributes else {
        return names;
    };
    for attr in code_attributes {
        let AttributeInfo::LocalVariableTable { local_variable_table } = attr else {
            continue;
        };
        for entry in local_variable_table {
            if entry.start_pc != 0 || entry.index > max_slot {
                continue;
            }
            match constant_pool.resolve_utf8(entry.name_index) {
                Ok(name) => {
                    names.insert(entry.index, name.to_owned());
                }
                Err(_) => {
                    debug!("skipping local variable entry with unresolvable name (slot {})",
                           entry.index);
                }
            }
        }
    }
    names
}
