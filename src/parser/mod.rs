//! A pull-based reader for the Java class file format.
//!
//! The reader walks the file's fixed structural order (magic, version,
//! constant pool, flags, this/super/interfaces, fields, methods,
//! attributes) and returns one fully decoded [`ClassFile`] record; callers
//! consume the result instead of receiving visitor callbacks.
//!
//! [`ClassFile`]: crate::model::class_file::ClassFile

pub mod class_file;

pub use self::class_file::parse_class_file;
