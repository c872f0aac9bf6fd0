//! Structures for the [Java SE class file
//! format](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html),
//! restricted to the records a stub generator traverses.

pub mod access_flags;
pub mod attributes;
pub mod constant_pool;

pub use self::attributes::AttributeInfo;
pub use self::constant_pool::ConstantPool;
pub use self::constant_pool::ConstantPoolInfo;

/// Represents an unsigned one-byte quantity.
#[allow(non_camel_case_types)]
pub type u1 = u8;

/// Represents an unsigned two-byte quantity.
#[allow(non_camel_case_types)]
pub type u2 = u16;

/// Represents an unsigned four-byte quantity.
#[allow(non_camel_case_types)]
pub type u4 = u32;

/// Represents an index into the constant pool.
#[allow(non_camel_case_types)]
pub type constant_pool_index = constant_pool::constant_pool_index;

#[derive(Debug)]
pub struct FieldInfo {
    /// Mask of flags used to denote access permissions to and properties of
    /// this field.
    pub access_flags: access_flags::field_access_flags::t,
    /// A valid index into the `constant_pool` table. The entry at that index
    /// must be a `ConstantPoolInfo::Utf8` structure representing a valid
    /// unqualified field name.
    pub name_index: constant_pool_index,
    /// A valid index into the `constant_pool` table. The entry at that index
    /// must be a `ConstantPoolInfo::Utf8` structure representing a valid
    /// field descriptor.
    pub descriptor_index: constant_pool_index,
    /// The attributes associated with this field.
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug)]
pub struct MethodInfo {
    /// Mask of flags used to denote access permissions to and properties of
    /// this method.
    pub access_flags: access_flags::method_access_flags::t,
    /// A valid index into the `constant_pool` table. The entry at that index
    /// must be a `ConstantPoolInfo::Utf8` structure representing a valid
    /// unqualified method name, or one of the special names `<init>` and
    /// `<clinit>`.
    pub name_index: constant_pool_index,
    /// A valid index into the `constant_pool` table. The entry at that index
    /// must be a `ConstantPoolInfo::Utf8` structure representing a valid
    /// method descriptor.
    pub descriptor_index: constant_pool_index,
    /// The attributes associated with this method.
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug)]
pub struct ClassFile {
    /// Minor version number.
    pub minor_version: u2,
    /// Major version number.
    pub major_version: u2,
    /// Table of structures representing string constants, class and
    /// interface names, field names, and other constants. The table is
    /// indexed from 1 to `constant_pool_count - 1`.
    pub constant_pool: ConstantPool,
    /// Mask of flags used to denote access permissions to and properties of
    /// this class or interface.
    pub access_flags: access_flags::class_access_flags::t,
    /// A valid index into the `constant_pool` table. The entry at that index
    /// must be a `ConstantPoolInfo::Class` structure naming the class
    /// defined by this file.
    pub this_class: constant_pool_index,
    /// Either zero (only for `java/lang/Object`) or a valid index into the
    /// `constant_pool` table whose entry is a `ConstantPoolInfo::Class`
    /// structure naming the direct superclass.
    pub super_class: constant_pool_index,
    /// Each value must be a valid index into the `constant_pool` table whose
    /// entry is a `ConstantPoolInfo::Class` structure naming a direct
    /// superinterface, in the left-to-right order given in the source for
    /// the type.
    pub interfaces: Vec<constant_pool_index>,
    /// The fields declared by this class or interface.
    pub fields: Vec<FieldInfo>,
    /// The methods declared by this class or interface. Does not include
    /// inherited methods.
    pub methods: Vec<MethodInfo>,
    /// The attributes of the class itself.
    pub attributes: Vec<AttributeInfo>,
}
