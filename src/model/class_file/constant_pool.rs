use super::u1;
use super::u2;
use super::u4;

use crate::error::{Error, Result};

#[allow(non_camel_case_types)]
pub type constant_pool_index = u2;

pub mod tags {
    use super::super::u1;
    pub const UTF_8: u1 = 1;
    pub const INTEGER: u1 = 3;
    pub const FLOAT: u1 = 4;
    pub const LONG: u1 = 5;
    pub const DOUBLE: u1 = 6;
    pub const CLASS: u1 = 7;
    pub const STRING: u1 = 8;
    pub const FIELD_REF: u1 = 9;
    pub const METHOD_REF: u1 = 10;
    pub const INTERFACE_METHOD_REF: u1 = 11;
    pub const NAME_AND_TYPE: u1 = 12;
    pub const METHOD_HANDLE: u1 = 15;
    pub const METHOD_TYPE: u1 = 16;
    pub const DYNAMIC: u1 = 17;
    pub const INVOKE_DYNAMIC: u1 = 18;
    pub const MODULE: u1 = 19;
    pub const PACKAGE: u1 = 20;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Utf8,
    Integer,
    Float,
    Long,
    Double,
    Class,
    String,
    FieldRef,
    MethodRef,
    InterfaceMethodRef,
    NameAndType,
    MethodHandle,
    MethodType,
    Dynamic,
    InvokeDynamic,
    Module,
    Package,
    Unknown(u1),
}

impl From<u1> for Tag {
    fn from(tag: u1) -> Self {
        match tag {
            tags::UTF_8 => Tag::Utf8,
            tags::INTEGER => Tag::Integer,
            tags::FLOAT => Tag::Float,
            tags::LONG => Tag::Long,
            tags::DOUBLE => Tag::Double,
            tags::CLASS => Tag::Class,
            tags::STRING => Tag::String,
            tags::FIELD_REF => Tag::FieldRef,
            tags::METHOD_REF => Tag::MethodRef,
            tags::INTERFACE_METHOD_REF => Tag::InterfaceMethodRef,
            tags::NAME_AND_TYPE => Tag::NameAndType,
            tags::METHOD_HANDLE => Tag::MethodHandle,
            tags::METHOD_TYPE => Tag::MethodType,
            tags::DYNAMIC => Tag::Dynamic,
            tags::INVOKE_DYNAMIC => Tag::InvokeDynamic,
            tags::MODULE => Tag::Module,
            tags::PACKAGE => Tag::Package,
            _ => Tag::Unknown(tag),
        }
    }
}

/// One decoded constant pool entry.
///
/// The stub generator only ever resolves `Utf8` and `Class` entries, but the
/// pool cannot be traversed without decoding every kind: each entry's width
/// depends on its tag.
#[derive(Debug)]
pub enum ConstantPoolInfo {
    /// Decoded string contents. The class files this crate targets store
    /// names and descriptors in the ASCII subset where modified UTF-8 and
    /// UTF-8 coincide; anything outside it is decoded lossily.
    Utf8 { contents: String },
    Integer { bytes: u4 },
    Float { bytes: u4 },
    Long { high_bytes: u4, low_bytes: u4 },
    Double { high_bytes: u4, low_bytes: u4 },
    Class { name_index: constant_pool_index },
    String { string_index: constant_pool_index },
    FieldRef { class_index: constant_pool_index, name_and_type_index: constant_pool_index },
    MethodRef { class_index: constant_pool_index, name_and_type_index: constant_pool_index },
    InterfaceMethodRef {
        class_index: constant_pool_index,
        name_and_type_index: constant_pool_index,
    },
    NameAndType {
        name_index: constant_pool_index,
        descriptor_index: constant_pool_index,
    },
    MethodHandle { reference_kind: u1, reference_index: constant_pool_index },
    MethodType { descriptor_index: constant_pool_index },
    Dynamic {
        bootstrap_method_attr_index: constant_pool_index,
        name_and_type_index: constant_pool_index,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: constant_pool_index,
        name_and_type_index: constant_pool_index,
    },
    Module { name_index: constant_pool_index },
    Package { name_index: constant_pool_index },
    /// The slot following a `Long` or `Double` entry. Referencing it is a
    /// pool malformation.
    Unusable,
}

/// The constant pool of one class file, indexed from 1 to
/// `constant_pool_count - 1`. Index 0 is reserved and never resolves.
#[derive(Debug)]
pub struct ConstantPool {
    entries: Vec<ConstantPoolInfo>,
}

impl ConstantPool {
    /// Wraps the decoded entries; `entries[0]` becomes pool index 1. The
    /// caller (the class-file reader) has already inserted the `Unusable`
    /// slot after each 8-byte constant.
    pub fn from_entries(entries: Vec<ConstantPoolInfo>) -> ConstantPool {
        ConstantPool { entries }
    }

    /// Number of slots in the pool, counting `Unusable` ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at a 1-based index, or `None` when the index is 0
    /// or past the end of the pool.
    pub fn get(&self, index: usize) -> Option<&ConstantPoolInfo> {
        if index == 0 {
            return None;
        }
        self.entries.get(index - 1)
    }

    /// Resolves an index expected to reference a `Utf8` entry.
    pub fn resolve_utf8(&self, index: constant_pool_index) -> Result<&str> {
        match self.get(index as usize) {
            Some(ConstantPoolInfo::Utf8 { contents }) => Ok(contents),
            _ => Err(Error::MalformedPool { index: index as usize }),
        }
    }

    /// Resolves an index expected to reference a `Class` entry, following it
    /// to its `Utf8` name and replacing the internal `/` separators with
    /// `.`. Nested-class names keep their `$` segments untouched.
    pub fn resolve_class_name(&self, index: constant_pool_index) -> Result<String> {
        match self.get(index as usize) {
            Some(&ConstantPoolInfo::Class { name_index }) => {
                Ok(self.resolve_utf8(name_index)?.replace('/', "."))
            }
            _ => Err(Error::MalformedPool { index: index as usize }),
        }
    }
}
