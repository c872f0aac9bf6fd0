use super::constant_pool_index;
use super::u1;
use super::u2;

/// One entry of a `LocalVariableTable` attribute: a local-variable slot has
/// the given name over the bytecode range `[start_pc, start_pc + length)`.
/// Method parameters are the entries whose range starts at offset 0.
#[derive(Debug)]
pub struct LocalVariableInfo {
    pub start_pc: u2,
    pub length: u2,
    /// Index of the `Utf8` entry holding the variable's name.
    pub name_index: constant_pool_index,
    /// Index of the `Utf8` entry holding the variable's field descriptor.
    pub descriptor_index: constant_pool_index,
    /// The variable's local-variable slot. 8-byte types occupy this slot
    /// and the next.
    pub index: u2,
}

#[derive(Debug)]
pub struct LineNumberInfo {
    pub start_pc: u2,
    pub line_number: u2,
}

/// A decoded attribute. Attributes the stub generator has no use for keep
/// only their raw bytes under `Unknown`.
#[derive(Debug)]
pub enum AttributeInfo {
    /// Method body metadata. The bytecode itself and the exception table
    /// are skipped during decoding; only the nested attributes matter here,
    /// since they carry the local-variable debug table.
    Code {
        max_stack: u2,
        max_locals: u2,
        attributes: Vec<AttributeInfo>,
    },
    /// The optional debug table associating local-variable slots with
    /// source-level names.
    LocalVariableTable { local_variable_table: Vec<LocalVariableInfo> },
    LineNumberTable { line_number_table: Vec<LineNumberInfo> },
    SourceFile { sourcefile_index: constant_pool_index },
    Unknown { attribute_name_index: constant_pool_index, info: Vec<u1> },
}
