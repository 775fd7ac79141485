//! Descriptor model handed to the generator by the protobuf front end
//!
//! Cross-file references are already resolved: every message reference
//! carries the path of the file that declares it.

/// One schema file and the services it declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Logical path as reported by the front end, e.g. `proto/user/user.proto`
    pub path: String,
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Declared (unqualified) service name, e.g. `UserService`
    pub name: String,
    /// Methods in declaration order
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub input: MessageRef,
    pub output: MessageRef,
    /// `google.api.http` annotation, if the method options carry one
    pub http: Option<HttpRule>,
}

/// Reference to a message declared somewhere in the descriptor tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRef {
    /// Simple message name, e.g. `GetUserReq`
    pub name: String,
    /// Path of the declaring file; empty when the front end could not tell
    pub file: String,
}

impl MessageRef {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Decoded `google.api.http` rule
///
/// `pattern` is `None` when the annotation is present but its oneof is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRule {
    pub pattern: Option<HttpPattern>,
}

impl HttpRule {
    pub fn new(pattern: HttpPattern) -> Self {
        Self {
            pattern: Some(pattern),
        }
    }
}

/// The `HttpRule.pattern` oneof, one variant per verb field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpPattern {
    Get(String),
    Put(String),
    Post(String),
    Delete(String),
    Patch(String),
    Custom { kind: String, path: String },
}
