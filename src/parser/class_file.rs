use log::{debug, warn};
use nom::bytes::complete::{tag, take};
use nom::number::complete::{be_u16, be_u32, be_u8};

use crate::error::{Error, Result};
use crate::model::class_file::attributes::{LineNumberInfo, LocalVariableInfo};
use crate::model::class_file::constant_pool::{ConstantPool, ConstantPoolInfo, Tag};
use crate::model::class_file::{AttributeInfo, ClassFile, FieldInfo, MethodInfo};

pub type Input<'a> = &'a [u8];

const MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Class-file major versions this reader accepts: Java 1.0 (45) through
/// Java 25 (69). The subset of the format read here has been stable across
/// that whole range.
const SUPPORTED_MAJOR: std::ops::RangeInclusive<u16> = 45..=69;

fn read_u8<'a>(input: Input<'a>, context: &'static str) -> Result<(Input<'a>, u8)> {
    be_u8::<Input<'a>, nom::error::Error<Input<'a>>>(input)
        .map_err(|_| Error::TruncatedInput { context })
}

fn read_u16<'a>(input: Input<'a>, context: &'static str) -> Result<(Input<'a>, u16)> {
    be_u16::<Input<'a>, nom::error::Error<Input<'a>>>(input)
        .map_err(|_| Error::TruncatedInput { context })
}

fn read_u32<'a>(input: Input<'a>, context: &'static str) -> Result<(Input<'a>, u32)> {
    be_u32::<Input<'a>, nom::error::Error<Input<'a>>>(input)
        .map_err(|_| Error::TruncatedInput { context })
}

fn read_bytes<'a>(
    input: Input<'a>,
    count: usize,
    context: &'static str,
) -> Result<(Input<'a>, Input<'a>)> {
    take::<usize, Input<'a>, nom::error::Error<Input<'a>>>(count)(input)
        .map_err(|_| Error::TruncatedInput { context })
}

fn magic(input: Input) -> Result<Input> {
    let (input, _) = tag::<&[u8], Input, nom::error::Error<Input>>(&MAGIC[..])(input)
        .map_err(|_| Error::BadMagic)?;
    Ok(input)
}

/// Decodes one constant pool entry body for an already-read tag. `index` is
/// the entry's 1-based slot, used only for error reporting.
fn constant_info<'a>(
    input: Input<'a>,
    tag: Tag,
    index: usize,
) -> Result<(Input<'a>, ConstantPoolInfo)> {
    let r = match tag {
        Tag::Utf8 => {
            let (input, length) = read_u16(input, "Utf8 length")?;
            let (input, bytes) = read_bytes(input, length as usize, "Utf8 contents")?;
            let contents = String::from_utf8_lossy(bytes).into_owned();
            (input, ConstantPoolInfo::Utf8 { contents })
        }
        Tag::Integer => {
            let (input, bytes) = read_u32(input, "Integer constant")?;
            (input, ConstantPoolInfo::Integer { bytes })
        }
        Tag::Float => {
            let (input, bytes) = read_u32(input, "Float constant")?;
            (input, ConstantPoolInfo::Float { bytes })
        }
        Tag::Long => {
            let (input, high_bytes) = read_u32(input, "Long constant")?;
            let (input, low_bytes) = read_u32(input, "Long constant")?;
            (input, ConstantPoolInfo::Long { high_bytes, low_bytes })
        }
        Tag::Double => {
            let (input, high_bytes) = read_u32(input, "Double constant")?;
            let (input, low_bytes) = read_u32(input, "Double constant")?;
            (input, ConstantPoolInfo::Double { high_bytes, low_bytes })
        }
        Tag::Class => {
            let (input, name_index) = read_u16(input, "Class name index")?;
            (input, ConstantPoolInfo::Class { name_index })
        }
        Tag::String => {
            let (input, string_index) = read_u16(input, "String index")?;
            (input, ConstantPoolInfo::String { string_index })
        }
        Tag::FieldRef => {
            let (input, class_index) = read_u16(input, "FieldRef")?;
            let (input, name_and_type_index) = read_u16(input, "FieldRef")?;
            (input, ConstantPoolInfo::FieldRef { class_index, name_and_type_index })
        }
        Tag::MethodRef => {
            let (input, class_index) = read_u16(input, "MethodRef")?;
            let (input, name_and_type_index) = read_u16(input, "MethodRef")?;
            (input, ConstantPoolInfo::MethodRef { class_index, name_and_type_index })
        }
        Tag::InterfaceMethodRef => {
            let (input, class_index) = read_u16(input, "InterfaceMethodRef")?;
            let (input, name_and_type_index) = read_u16(input, "InterfaceMethodRef")?;
            (input, ConstantPoolInfo::InterfaceMethodRef { class_index, name_and_type_index })
        }
        Tag::NameAndType => {
            let (input, name_index) = read_u16(input, "NameAndType")?;
            let (input, descriptor_index) = read_u16(input, "NameAndType")?;
            (input, ConstantPoolInfo::NameAndType { name_index, descriptor_index })
        }
        Tag::MethodHandle => {
            let (input, reference_kind) = read_u8(input, "MethodHandle kind")?;
            let (input, reference_index) = read_u16(input, "MethodHandle index")?;
            (input, ConstantPoolInfo::MethodHandle { reference_kind, reference_index })
        }
        Tag::MethodType => {
            let (input, descriptor_index) = read_u16(input, "MethodType")?;
            (input, ConstantPoolInfo::MethodType { descriptor_index })
        }
        Tag::Dynamic => {
            let (input, bootstrap_method_attr_index) = read_u16(input, "Dynamic")?;
            let (input, name_and_type_index) = read_u16(input, "Dynamic")?;
            (input, ConstantPoolInfo::Dynamic { bootstrap_method_attr_index, name_and_type_index })
        }
        Tag::InvokeDynamic => {
            let (input, bootstrap_method_attr_index) = read_u16(input, "InvokeDynamic")?;
            let (input, name_and_type_index) = read_u16(input, "InvokeDynamic")?;
            (
                input,
                ConstantPoolInfo::InvokeDynamic { bootstrap_method_attr_index, name_and_type_index },
            )
        }
        Tag::Module => {
            let (input, name_index) = read_u16(input, "Module")?;
            (input, ConstantPoolInfo::Module { name_index })
        }
        Tag::Package => {
            let (input, name_index) = read_u16(input, "Package")?;
            (input, ConstantPoolInfo::Package { name_index })
        }
        Tag::Unknown(_) => return Err(Error::MalformedPool { index }),
    };
    Ok(r)
}

/// Reads the constant pool table. `count` is the raw `constant_pool_count`
/// field, one greater than the number of slots; 8-byte constants occupy two
/// slots, so the entry loop tracks slots rather than entries.
fn constant_pool(mut input: Input, count: u16) -> Result<(Input, ConstantPool)> {
    let mut entries = Vec::with_capacity(usize::from(count).saturating_sub(1));
    let mut index: usize = 1;
    while index < count as usize {
        let (rest, tag_byte) = read_u8(input, "constant pool tag")?;
        let (rest, info) = constant_info(rest, Tag::from(tag_byte), index)?;
        let double_width =
            matches!(info, ConstantPoolInfo::Long { .. } | ConstantPoolInfo::Double { .. });
        entries.push(info);
        if double_width {
            entries.push(ConstantPoolInfo::Unusable);
            index += 2;
        } else {
            index += 1;
        }
        input = rest;
    }
    debug!("decoded constant pool with {} slots", entries.len());
    Ok((input, ConstantPool::from_entries(entries)))
}

/// Reads `LocalVariableTable` entries from an attribute body. A table cut
/// short by a bad `attribute_length` yields the entries read so far; debug
/// metadata is never worth failing the decode over.
fn local_variable_table(body: Input) -> AttributeInfo {
    let mut table = Vec::new();
    if let Ok((mut body, table_length)) = read_u16(body, "LocalVariableTable length") {
        for _ in 0..table_length {
            let entry = read_u16(body, "LocalVariableTable entry").and_then(|(b, start_pc)| {
                let (b, length) = read_u16(b, "LocalVariableTable entry")?;
                let (b, name_index) = read_u16(b, "LocalVariableTable entry")?;
                let (b, descriptor_index) = read_u16(b, "LocalVariableTable entry")?;
                let (b, index) = read_u16(b, "LocalVariableTable entry")?;
                Ok((b, LocalVariableInfo { start_pc, length, name_index, descriptor_index, index }))
            });
            match entry {
                Ok((rest, info)) => {
                    table.push(info);
                    body = rest;
                }
                Err(_) => {
                    warn!("LocalVariableTable truncated after {} entries", table.len());
                    break;
                }
            }
        }
    }
    AttributeInfo::LocalVariableTable { local_variable_table: table }
}

fn line_number_table(body: Input) -> AttributeInfo {
    let mut table = Vec::new();
    if let Ok((mut body, table_length)) = read_u16(body, "LineNumberTable length") {
        for _ in 0..table_length {
            let entry = read_u16(body, "LineNumberTable entry").and_then(|(b, start_pc)| {
                let (b, line_number) = read_u16(b, "LineNumberTable entry")?;
                Ok((b, LineNumberInfo { start_pc, line_number }))
            });
            match entry {
                Ok((rest, info)) => {
                    table.push(info);
                    body = rest;
                }
                Err(_) => {
                    warn!("LineNumberTable truncated after {} entries", table.len());
                    break;
                }
            }
        }
    }
    AttributeInfo::LineNumberTable { line_number_table: table }
}

/// Decodes a `Code` attribute body far enough to reach its nested
/// attributes. The bytecode and exception table are skipped, not modeled.
fn code_attribute(body: Input, constant_pool: &ConstantPool) -> Result<AttributeInfo> {
    let (body, max_stack) = read_u16(body, "Code max_stack")?;
    let (body, max_locals) = read_u16(body, "Code max_locals")?;
    let (body, code_length) = read_u32(body, "Code length")?;
    let (body, _code) = read_bytes(body, code_length as usize, "Code bytecode")?;
    let (body, exception_table_length) = read_u16(body, "Code exception table length")?;
    let (body, _handlers) =
        read_bytes(body, exception_table_length as usize * 8, "Code exception table")?;
    let (body, attributes_count) = read_u16(body, "Code attributes count")?;
    let mut attributes = Vec::with_capacity(attributes_count as usize);
    let mut body = body;
    for _ in 0..attributes_count {
        let (rest, attr) = attribute(body, constant_pool)?;
        attributes.push(attr);
        body = rest;
    }
    Ok(AttributeInfo::Code { max_stack, max_locals, attributes })
}

/// Reads one attribute. The body is sliced to the declared length first, so
/// a malformed inner structure can never consume its neighbors' bytes.
fn attribute<'a>(
    input: Input<'a>,
    constant_pool: &ConstantPool,
) -> Result<(Input<'a>, AttributeInfo)> {
    let (input, attribute_name_index) = read_u16(input, "attribute name index")?;
    let (input, attribute_length) = read_u32(input, "attribute length")?;
    let (input, body) = read_bytes(input, attribute_length as usize, "attribute body")?;
    let info = match constant_pool.resolve_utf8(attribute_name_index)? {
        "Code" => code_attribute(body, constant_pool)?,
        "LocalVariableTable" => local_variable_table(body),
        "LineNumberTable" => line_number_table(body),
        "SourceFile" => {
            let (_, sourcefile_index) = read_u16(body, "SourceFile index")?;
            AttributeInfo::SourceFile { sourcefile_index }
        }
        _ => AttributeInfo::Unknown { attribute_name_index, info: body.to_vec() },
    };
    Ok((input, info))
}

fn attribute_list<'a>(
    input: Input<'a>,
    constant_pool: &ConstantPool,
    context: &'static str,
) -> Result<(Input<'a>, Vec<AttributeInfo>)> {
    let (input, attributes_count) = read_u16(input, context)?;
    let mut attributes = Vec::with_capacity(attributes_count as usize);
    let mut input = input;
    for _ in 0..attributes_count {
        let (rest, attr) = attribute(input, constant_pool)?;
        attributes.push(attr);
        input = rest;
    }
    Ok((input, attributes))
}

fn field<'a>(input: Input<'a>, constant_pool: &ConstantPool) -> Result<(Input<'a>, FieldInfo)> {
    let (input, access_flags) = read_u16(input, "field access flags")?;
    let (input, name_index) = read_u16(input, "field name index")?;
    let (input, descriptor_index) = read_u16(input, "field descriptor index")?;
    let (input, attributes) = attribute_list(input, constant_pool, "field attributes count")?;
    Ok((input, FieldInfo { access_flags, name_index, descriptor_index, attributes }))
}

fn method<'a>(input: Input<'a>, constant_pool: &ConstantPool) -> Result<(Input<'a>, MethodInfo)> {
    let (input, access_flags) = read_u16(input, "method access flags")?;
    let (input, name_index) = read_u16(input, "method name index")?;
    let (input, descriptor_index) = read_u16(input, "method descriptor index")?;
    let (input, attributes) = attribute_list(input, constant_pool, "method attributes count")?;
    Ok((input, MethodInfo { access_flags, name_index, descriptor_index, attributes }))
}

/// Decodes one class file from an already-materialized byte buffer.
///
/// The decode is single-pass and synchronous; nothing is shared between
/// invocations, so independent buffers may be decoded concurrently by the
/// caller without synchronization.
pub fn parse_class_file(bytes: &[u8]) -> Result<ClassFile> {
    let input = magic(bytes)?;
    let (input, minor_version) = read_u16(input, "minor version")?;
    let (input, major_version) = read_u16(input, "major version")?;
    if !SUPPORTED_MAJOR.contains(&major_version) {
        return Err(Error::UnsupportedVersion { major: major_version, minor: minor_version });
    }
    let (input, constant_pool_count) = read_u16(input, "constant pool count")?;
    let (input, constant_pool) = constant_pool(input, constant_pool_count)?;
    let (input, access_flags) = read_u16(input, "class access flags")?;
    let (input, this_class) = read_u16(input, "this_class index")?;
    let (input, super_class) = read_u16(input, "super_class index")?;
    let (input, interfaces_count) = read_u16(input, "interfaces count")?;
    let mut interfaces = Vec::with_capacity(interfaces_count as usize);
    let mut input = input;
    for _ in 0..interfaces_count {
        let (rest, interface_index) = read_u16(input, "interface index")?;
        interfaces.push(interface_index);
        input = rest;
    }
    let (input, fields_count) = read_u16(input, "fields count")?;
    let mut fields = Vec::with_capacity(fields_count as usize);
    let mut input = input;
    for _ in 0..fields_count {
        let (rest, f) = field(input, &constant_pool)?;
        fields.push(f);
        input = rest;
    }
    let (input, methods_count) = read_u16(input, "methods count")?;
    let mut methods = Vec::with_capacity(methods_count as usize);
    let mut input = input;
    for _ in 0..methods_count {
        let (rest, m) = method(input, &constant_pool)?;
        methods.push(m);
        input = rest;
    }
    let (input, attributes) = attribute_list(input, &constant_pool, "class attributes count")?;
    if !input.is_empty() {
        debug!("{} trailing bytes after class attributes", input.len());
    }
    Ok(ClassFile {
        minor_version,
        major_version,
        constant_pool,
        access_flags,
        this_class,
        super_class,
        interfaces,
        fields,
        methods,
        attributes,
    })
}
