use thiserror::Error;

/// Errors surfaced while decoding a class file or emitting its stub.
///
/// Every variant except [`Error::Io`] is fatal to the decode of that class:
/// the caller gets the error instead of partial stub text. Recoverable
/// situations (absent debug metadata, unrecognized class types) never reach
/// this type; they degrade inside the stub builder.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer ended in the middle of the named structure.
    #[error("class file truncated while reading {context}")]
    TruncatedInput { context: &'static str },

    /// The buffer does not start with the class-file magic number.
    #[error("not a class file (bad magic number)")]
    BadMagic,

    /// The class-file version is outside the supported range.
    #[error("unsupported class file version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },

    /// A constant pool index is out of range, refers to an unusable slot,
    /// or refers to an entry of the wrong kind.
    #[error("malformed constant pool reference at index {index}")]
    MalformedPool { index: usize },

    /// A field or method descriptor violates the descriptor grammar.
    #[error("malformed type descriptor {descriptor:?}")]
    MalformedDescriptor { descriptor: String },

    /// Writing rendered stub text to a sink failed.
    #[error("failed to write stub text: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
