//! Assembles minimal but structurally complete class files in memory, so
//! integration tests exercise the real byte-level reader without binary
//! fixtures checked into the tree.

#![allow(dead_code)]

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_ABSTRACT: u16 = 0x0400;

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub struct ClassFileBuilder {
    pool: Vec<u8>,
    next_index: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    methods: Vec<Vec<u8>>,
    major_version: u16,
}

impl ClassFileBuilder {
    /// Starts a class named `this_name` extending `super_name`, both in
    /// internal (slash-separated) form.
    pub fn new(this_name: &str, super_name: &str) -> ClassFileBuilder {
        let mut b = ClassFileBuilder {
            pool: Vec::new(),
            next_index: 1,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            methods: Vec::new(),
            major_version: 52,
        };
        b.this_class = b.class(this_name);
        b.super_class = b.class(super_name);
        b
    }

    pub fn utf8(&mut self, contents: &str) -> u16 {
        let index = self.next_index;
        self.next_index += 1;
        self.pool.push(1);
        push_u16(&mut self.pool, contents.len() as u16);
        self.pool.extend_from_slice(contents.as_bytes());
        index
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let index = self.next_index;
        self.next_index += 1;
        self.pool.push(7);
        push_u16(&mut self.pool, name_index);
        index
    }

    /// An 8-byte constant, occupying this slot and the next.
    pub fn long_constant(&mut self, value: i64) -> u16 {
        let index = self.next_index;
        self.next_index += 2;
        self.pool.push(5);
        self.pool.extend_from_slice(&value.to_be_bytes());
        index
    }

    pub fn interface(&mut self, name: &str) -> &mut Self {
        let index = self.class(name);
        self.interfaces.push(index);
        self
    }

    fn attribute(&mut self, name: &str, body: &[u8]) -> Vec<u8> {
        let name_index = self.utf8(name);
        let mut out = Vec::new();
        push_u16(&mut out, name_index);
        push_u32(&mut out, body.len() as u32);
        out.extend_from_slice(body);
        out
    }

    /// Encodes a `LocalVariableTable` attribute; entries are
    /// `(start_pc, name, slot)`.
    pub fn local_variable_table(&mut self, entries: &[(u16, &str, u16)]) -> Vec<u8> {
        let mut body = Vec::new();
        push_u16(&mut body, entries.len() as u16);
        for &(start_pc, name, slot) in entries {
            let name_index = self.utf8(name);
            let descriptor_index = self.utf8("I");
            push_u16(&mut body, start_pc);
            push_u16(&mut body, 8);
            push_u16(&mut body, name_index);
            push_u16(&mut body, descriptor_index);
            push_u16(&mut body, slot);
        }
        self.attribute("LocalVariableTable", &body)
    }

    /// Encodes a `Code` attribute holding a single `return` instruction and
    /// the given nested attributes.
    pub fn code(&mut self, nested: Vec<Vec<u8>>) -> Vec<u8> {
        let mut body = Vec::new();
        push_u16(&mut body, 2); // max_stack
        push_u16(&mut body, 4); // max_locals
        push_u32(&mut body, 1);
        body.push(0xB1); // return
        push_u16(&mut body, 0); // empty exception table
        push_u16(&mut body, nested.len() as u16);
        for attr in nested {
            body.extend_from_slice(&attr);
        }
        self.attribute("Code", &body)
    }

    pub fn method(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: Vec<Vec<u8>>,
    ) -> &mut Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut out = Vec::new();
        push_u16(&mut out, access_flags);
        push_u16(&mut out, name_index);
        push_u16(&mut out, descriptor_index);
        push_u16(&mut out, attributes.len() as u16);
        for attr in attributes {
            out.extend_from_slice(&attr);
        }
        self.methods.push(out);
        self
    }

    /// A method whose `Code` attribute carries parameter names live from
    /// offset 0, given as `(name, slot)`.
    pub fn method_with_locals(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        locals: &[(&str, u16)],
    ) -> &mut Self {
        let entries: Vec<(u16, &str, u16)> =
            locals.iter().map(|&(name, slot)| (0, name, slot)).collect();
        let table = self.local_variable_table(&entries);
        let code = self.code(vec![table]);
        self.method(access_flags, name, descriptor, vec![code])
    }

    pub fn major_version(&mut self, major: u16) -> &mut Self {
        self.major_version = major;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0xCA, 0xFE, 0xBA, 0xBE];
        push_u16(&mut out, 0);
        push_u16(&mut out, self.major_version);
        push_u16(&mut out, self.next_index); // constant_pool_count = slots + 1
        out.extend_from_slice(&self.pool);
        push_u16(&mut out, 0x0021); // ACC_PUBLIC | ACC_SUPER
        push_u16(&mut out, self.this_class);
        push_u16(&mut out, self.super_class);
        push_u16(&mut out, self.interfaces.len() as u16);
        for &index in &self.interfaces {
            push_u16(&mut out, index);
        }
        push_u16(&mut out, 0); // no fields
        push_u16(&mut out, self.methods.len() as u16);
        for method in &self.methods {
            out.extend_from_slice(method);
        }
        push_u16(&mut out, 0); // no class attributes
        out
    }
}
