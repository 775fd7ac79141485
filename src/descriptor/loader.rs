//! Front-end adapter: lowers protoc descriptors into the generator's model
//!
//! `proto_file` entries are kept as raw bytes and fed to a reflective
//! [`DescriptorPool`], so the `google.api.http` method option survives
//! decoding and can be read back as an extension.

use prost::Message;
use prost_reflect::{DescriptorPool, ExtensionDescriptor, Value};
use tracing::{debug, warn};

use crate::descriptor::{
    FileDescriptor, HttpPattern, HttpRule, MessageRef, MethodDescriptor, ServiceDescriptor,
};
use crate::generation::GenerationError;

/// Fully qualified name of the HTTP binding extension on `MethodOptions`
pub const HTTP_EXTENSION: &str = "google.api.http";

/// `CodeGeneratorRequest` with `proto_file` left undecoded
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawCodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    #[prost(bytes = "vec", repeated, tag = "15")]
    pub proto_file: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub file: Vec<Vec<u8>>,
}

/// The subset of `google.api.HttpRule` the generator reads
#[derive(Clone, PartialEq, ::prost::Message)]
struct HttpRuleMessage {
    #[prost(oneof = "PatternMessage", tags = "2, 3, 4, 5, 6, 8")]
    pub pattern: Option<PatternMessage>,
}

#[derive(Clone, PartialEq, ::prost::Oneof)]
enum PatternMessage {
    #[prost(string, tag = "2")]
    Get(String),
    #[prost(string, tag = "3")]
    Put(String),
    #[prost(string, tag = "4")]
    Post(String),
    #[prost(string, tag = "5")]
    Delete(String),
    #[prost(string, tag = "6")]
    Patch(String),
    #[prost(message, tag = "8")]
    Custom(CustomPatternMessage),
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct CustomPatternMessage {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(string, tag = "2")]
    pub path: String,
}

impl From<HttpRuleMessage> for HttpRule {
    fn from(message: HttpRuleMessage) -> Self {
        let pattern = message.pattern.map(|pattern| match pattern {
            PatternMessage::Get(path) => HttpPattern::Get(path),
            PatternMessage::Put(path) => HttpPattern::Put(path),
            PatternMessage::Post(path) => HttpPattern::Post(path),
            PatternMessage::Delete(path) => HttpPattern::Delete(path),
            PatternMessage::Patch(path) => HttpPattern::Patch(path),
            PatternMessage::Custom(custom) => HttpPattern::Custom {
                kind: custom.kind,
                path: custom.path,
            },
        });
        HttpRule { pattern }
    }
}

/// A decoded plugin request: the option string plus the files to generate
#[derive(Debug, Clone, Default)]
pub struct PluginRequest {
    pub parameter: String,
    pub files: Vec<FileDescriptor>,
}

/// Decode a `CodeGeneratorRequest` read from protoc's stdin
pub fn decode_request(bytes: &[u8]) -> Result<PluginRequest, GenerationError> {
    let request = RawCodeGeneratorRequest::decode(bytes).map_err(|e| {
        GenerationError::Descriptor(format!("invalid CodeGeneratorRequest: {e}"))
    })?;

    let pool = build_pool(request.proto_file)?;
    let files = lower_files(&pool, &request.file_to_generate)?;

    Ok(PluginRequest {
        parameter: request.parameter.unwrap_or_default(),
        files,
    })
}

/// Load a serialized `FileDescriptorSet`
///
/// When `files_to_generate` is empty every file in the set is lowered.
pub fn load_descriptor_set(
    bytes: &[u8],
    files_to_generate: &[String],
) -> Result<Vec<FileDescriptor>, GenerationError> {
    let set = RawFileDescriptorSet::decode(bytes)
        .map_err(|e| GenerationError::Descriptor(format!("invalid FileDescriptorSet: {e}")))?;
    let pool = build_pool(set.file)?;

    if files_to_generate.is_empty() {
        let all: Vec<String> = pool.files().map(|f| f.name().to_string()).collect();
        return lower_files(&pool, &all);
    }
    lower_files(&pool, files_to_generate)
}

fn build_pool(files: Vec<Vec<u8>>) -> Result<DescriptorPool, GenerationError> {
    let bytes = RawFileDescriptorSet { file: files }.encode_to_vec();
    DescriptorPool::decode(bytes.as_slice())
        .map_err(|e| GenerationError::Descriptor(format!("failed to build descriptor pool: {e}")))
}

fn lower_files(
    pool: &DescriptorPool,
    names: &[String],
) -> Result<Vec<FileDescriptor>, GenerationError> {
    let http_ext = pool.get_extension_by_name(HTTP_EXTENSION);
    if http_ext.is_none() {
        debug!("{HTTP_EXTENSION} is not declared in the request; no method can be bound");
    }

    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let file = pool.get_file_by_name(name).ok_or_else(|| {
            GenerationError::Descriptor(format!("file to generate not found in request: {name}"))
        })?;

        let services = file
            .services()
            .map(|service| ServiceDescriptor {
                name: service.name().to_string(),
                methods: service
                    .methods()
                    .map(|method| MethodDescriptor {
                        name: method.name().to_string(),
                        input: message_ref(&method.input()),
                        output: message_ref(&method.output()),
                        http: http_ext
                            .as_ref()
                            .and_then(|ext| http_rule(&method, ext)),
                    })
                    .collect(),
            })
            .collect();

        files.push(FileDescriptor {
            path: file.name().to_string(),
            services,
        });
    }
    Ok(files)
}

fn message_ref(message: &prost_reflect::MessageDescriptor) -> MessageRef {
    MessageRef::new(message.name(), message.parent_file().name())
}

/// Read the HTTP rule off a method; anything undecodable counts as absent
fn http_rule(
    method: &prost_reflect::MethodDescriptor,
    ext: &ExtensionDescriptor,
) -> Option<HttpRule> {
    let options = method.options();
    if !options.has_extension(ext) {
        return None;
    }

    match options.get_extension(ext).as_ref() {
        Value::Message(message) => {
            let bytes = message.encode_to_vec();
            match HttpRuleMessage::decode(bytes.as_slice()) {
                Ok(rule) => Some(rule.into()),
                Err(e) => {
                    warn!(
                        "Ignoring undecodable {HTTP_EXTENSION} on {}: {e}",
                        method.full_name()
                    );
                    None
                }
            }
        }
        other => {
            warn!(
                "Ignoring {HTTP_EXTENSION} on {} with unexpected value {other:?}",
                method.full_name()
            );
            None
        }
    }
}
