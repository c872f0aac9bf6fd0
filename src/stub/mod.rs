//! Builds and renders the Python-style stub for one decoded class.
//!
//! The builder visits the class record and its method records in file
//! order, applies the visibility filter, and renders one `class` line
//! followed by one `def` line per surviving method.

pub mod mapper;
pub mod params;

use std::io::Write;

use log::debug;

use crate::error::Result;
use crate::model::class_file::access_flags::method_access_flags;
use crate::model::class_file::constant_pool::ConstantPool;
use crate::model::class_file::{ClassFile, MethodInfo};
use crate::parser;
use crate::sig::{MethodDescriptor, Type};

pub use self::mapper::map_type;

/// One rendered-to-be method: target name, staticness, named parameters in
/// declaration order, and the return type.
#[derive(Debug)]
pub struct MethodStub {
    pub name: String,
    pub is_static: bool,
    pub parameters: Vec<(String, Type)>,
    pub return_type: Type,
}

/// The stub model for one class: simple name, base types (superclass
/// first, then interfaces in declared order), and the public methods.
#[derive(Debug)]
pub struct ClassStub {
    pub name: String,
    pub bases: Vec<String>,
    pub methods: Vec<MethodStub>,
}

impl MethodStub {
    /// Builds the stub for one method record, or `None` when the method is
    /// filtered out of the public surface. Name and descriptor are resolved
    /// before filtering, so a malformed method record fails the decode even
    /// when the method itself would not render.
    fn from_method(method: &MethodInfo, constant_pool: &ConstantPool) -> Result<Option<MethodStub>> {
        let raw_name = constant_pool.resolve_utf8(method.name_index)?;
        let descriptor =
            MethodDescriptor::parse(constant_pool.resolve_utf8(method.descriptor_index)?)?;
        if method.access_flags & method_access_flags::ACC_PUBLIC == 0 {
            debug!("skipping non-public method {}", raw_name);
            return Ok(None);
        }
        if raw_name == "<clinit>" {
            return Ok(None);
        }
        let is_static = method.access_flags & method_access_flags::ACC_STATIC != 0;
        let name = if raw_name == "<init>" { "__init__".to_owned() } else { raw_name.to_owned() };

        // Instance methods keep slot 0 for the receiver; parameters then
        // occupy consecutive slots, wide primitives taking two each.
        let first_slot: u16 = if is_static { 0 } else { 1 };
        let last_slot = descriptor
            .parameters
            .iter()
            .fold(first_slot, |slot, ty| slot.saturating_add(ty.width()));
        let names = params::parameter_names(method, constant_pool, last_slot);

        let mut parameters = Vec::with_capacity(descriptor.parameters.len());
        let mut slot = first_slot;
        for (position, ty) in descriptor.parameters.iter().enumerate() {
            let param_name = match names.get(&slot) {
                Some(found) => found.clone(),
                None => format!("arg{}", position),
            };
            parameters.push((param_name, ty.clone()));
            slot = slot.saturating_add(ty.width());
        }
        Ok(Some(MethodStub {
            name,
            is_static,
            parameters,
            return_type: descriptor.return_type,
        }))
    }
}

impl ClassStub {
    /// Builds the stub model from a decoded class file. Fails on the fatal
    /// conditions of the decode (bad pool references, malformed
    /// descriptors); absent debug names degrade to `arg<i>` placeholders.
    pub fn from_class_file(class: &ClassFile) -> Result<ClassStub> {
        let constant_pool = &class.constant_pool;
        let qualified = constant_pool.resolve_class_name(class.this_class)?;
        let name = match qualified.rsplit('.').next() {
            Some(simple) => simple.to_owned(),
            None => qualified.clone(),
        };

        let mut bases = Vec::new();
        if class.super_class != 0 {
            bases.push(constant_pool.resolve_class_name(class.super_class)?);
        }
        for &interface_index in &class.interfaces {
            bases.push(constant_pool.resolve_class_name(interface_index)?);
        }

        let mut methods = Vec::new();
        for method in &class.methods {
            if let Some(stub) = MethodStub::from_method(method, constant_pool)? {
                methods.push(stub);
            }
        }
        Ok(ClassStub { name, bases, methods })
    }

    /// Renders the stub as Python text: the class line, then one indented
    /// `def` line per method, `@staticmethod`-prefixed where applicable.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.bases.is_empty() {
            out.push_str(&format!("class {}:\n", self.name));
        } else {
            out.push_str(&format!("class {}({}):\n", self.name, self.bases.join(", ")));
        }
        if self.methods.is_empty() {
            out.push_str("    ...\n");
            return out;
        }
        for method in &self.methods {
            if method.is_static {
                out.push_str("    @staticmethod\n");
            }
            let mut rendered = Vec::with_capacity(method.parameters.len() + 1);
            if !method.is_static {
                rendered.push("self".to_owned());
            }
            for (param_name, ty) in &method.parameters {
                rendered.push(format!("{}: {}", param_name, mapper::map_type(ty)));
            }
            out.push_str(&format!(
                "    def {}({}) -> {}: ...\n",
                method.name,
                rendered.join(", "),
                mapper::map_type(&method.return_type)
            ));
        }
        out
    }

    /// Writes the rendered stub to a sink.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Decodes one class file and renders its stub. Convenience entry point
/// covering the whole pipeline.
pub fn generate(bytes: &[u8]) -> Result<String> {
    let class = parser::parse_class_file(bytes)?;
    let stub = ClassStub::from_class_file(&class)?;
    Ok(stub.render())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::class_file::attributes::LocalVariableInfo;
    use crate::model::class_file::{AttributeInfo, ConstantPoolInfo};

    const ACC_PUBLIC: u16 = method_access_flags::ACC_PUBLIC;
    const ACC_STATIC: u16 = method_access_flags::ACC_STATIC;

    struct Fixture {
        entries: Vec<ConstantPoolInfo>,
        methods: Vec<MethodInfo>,
        interfaces: Vec<u16>,
        this_class: u16,
        super_class: u16,
    }

    impl Fixture {
        fn new(this_name: &str, super_name: &str) -> Fixture {
            let mut f = Fixture {
                entries: Vec::new(),
                methods: Vec::new(),
                interfaces: Vec::new(),
                this_class: 0,
                super_class: 0,
            };
            f.this_class = f.class(this_name);
            f.super_class = f.class(super_name);
            f
        }

        fn utf8(&mut self, contents: &str) -> u16 {
            self.entries.push(ConstantPoolInfo::Utf8 { contents: contents.to_owned() });
            self.entries.len() as u16
        }

        fn class(&mut self, name: &str) -> u16 {
            let name_index = self.utf8(name);
            self.entries.push(ConstantPoolInfo::Class { name_index });
            self.entries.len() as u16
        }

        fn interface(&mut self, name: &str) {
            let index = self.class(name);
            self.interfaces.push(index);
        }

        fn method(&mut self, access_flags: u16, name: &str, descriptor: &str, locals: &[(&str, u16)]) {
            let name_index = self.utf8(name);
            let descriptor_index = self.utf8(descriptor);
            let local_variable_table = locals
                .iter()
                .map(|&(local_name, slot)| {
                    let local_name_index = self.utf8(local_name);
                    LocalVariableInfo {
                        start_pc: 0,
                        length: 8,
                        name_index: local_name_index,
                        descriptor_index: 0,
                        index: slot,
                    }
                })
                .collect();
            self.methods.push(MethodInfo {
                access_flags,
                name_index,
                descriptor_index,
                attributes: vec![AttributeInfo::Code {
                    max_stack: 2,
                    max_locals: 4,
                    attributes: vec![AttributeInfo::LocalVariableTable { local_variable_table }],
                }],
            });
        }

        fn build(self) -> ClassFile {
            ClassFile {
                minor_version: 0,
                major_version: 52,
                constant_pool: ConstantPool::from_entries(self.entries),
                access_flags: 0x0021,
                this_class: self.this_class,
                super_class: self.super_class,
                interfaces: self.interfaces,
                fields: Vec::new(),
                methods: self.methods,
                attributes: Vec::new(),
            }
        }
    }

    #[test]
    fn renders_bases_in_declared_order() {
        let mut f = Fixture::new("com/example/Widget", "com/example/A");
        f.interface("com/example/B");
        f.interface("com/example/C");
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        assert_eq!(
            stub.render(),
            "class Widget(com.example.A, com.example.B, com.example.C):\n    ...\n"
        );
    }

    #[test]
    fn renders_instance_method_with_recovered_names() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(
            ACC_PUBLIC,
            "check",
            "(ILjava/lang/String;)Z",
            &[("this", 0), ("n", 1), ("s", 2)],
        );
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        let text = stub.render();
        assert!(text.contains("    def check(self, n: int, s: str) -> bool: ...\n"), "{}", text);
    }

    #[test]
    fn excludes_methods_lacking_the_public_flag() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        for flags in [0, 0x0002, 0x0004, ACC_STATIC, 0x0002 | ACC_STATIC, 0x0010] {
            f.method(flags, "hidden", "()V", &[]);
        }
        f.method(ACC_PUBLIC, "visible", "()V", &[]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        assert_eq!(stub.methods.len(), 1);
        assert_eq!(stub.methods[0].name, "visible");
    }

    #[test]
    fn constructor_renders_under_synthetic_name() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC, "<init>", "()V", &[("this", 0)]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        assert_eq!(stub.render(), "class Widget(java.lang.Object):\n    def __init__(self) -> None: ...\n");
    }

    #[test]
    fn class_initializer_never_renders() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC | ACC_STATIC, "<clinit>", "()V", &[]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        assert!(stub.methods.is_empty());
    }

    #[test]
    fn static_method_renders_marker_and_slot_zero_names() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC | ACC_STATIC, "of", "(I)Lcom/example/Widget;", &[("n", 0)]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        let text = stub.render();
        assert!(
            text.contains("    @staticmethod\n    def of(n: int) -> com.example.Widget: ...\n"),
            "{}",
            text
        );
    }

    #[test]
    fn wide_parameters_shift_following_slots() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC, "seek", "(JI)V", &[("this", 0), ("offset", 1), ("whence", 3)]);
        f.method(ACC_PUBLIC | ACC_STATIC, "at", "(DI)V", &[("pos", 0), ("mode", 2)]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        let text = stub.render();
        assert!(text.contains("def seek(self, offset: int, whence: int) -> None: ...\n"), "{}", text);
        assert!(text.contains("def at(pos: float, mode: int) -> None: ...\n"), "{}", text);
    }

    #[test]
    fn missing_debug_names_degrade_to_positional_placeholders() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC, "blend", "(FF)F", &[]);
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        let text = stub.render();
        assert!(
            text.contains("    def blend(self, arg0: float, arg1: float) -> float: ...\n"),
            "{}",
            text
        );
    }

    #[test]
    fn class_with_no_bases_renders_without_parentheses() {
        let mut f = Fixture::new("java/lang/Object", "unused");
        f.super_class = 0;
        let stub = ClassStub::from_class_file(&f.build()).unwrap();
        assert_eq!(stub.render(), "class Object:\n    ...\n");
    }

    #[test]
    fn malformed_method_descriptor_fails_the_decode() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC, "broken", "(Q)V", &[]);
        assert!(matches!(
            ClassStub::from_class_file(&f.build()),
            Err(crate::Error::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn dangling_pool_reference_fails_the_decode() {
        let mut f = Fixture::new("com/example/Widget", "java/lang/Object");
        f.method(ACC_PUBLIC, "fine", "()V", &[]);
        let mut class = f.build();
        class.super_class = 500;
        assert!(matches!(
            ClassStub::from_class_file(&class),
            Err(crate::Error::MalformedPool { index: 500 })
        ));
    }
}
