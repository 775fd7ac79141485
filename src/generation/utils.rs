//! String transformation utilities for code generation

/// Conventional suffix stripped from declared service names
pub const SERVICE_SUFFIX: &str = "Service";

const PROTO_EXTENSION: &str = ".proto";

/// Strips a trailing `Service` from a declared service name.
///
/// # Examples
/// ```
/// use protoc_gen_webapi::generation::utils::strip_service_suffix;
///
/// assert_eq!(strip_service_suffix("UserService"), "User");
/// assert_eq!(strip_service_suffix("Billing"), "Billing");
/// ```
pub fn strip_service_suffix(name: &str) -> &str {
    name.strip_suffix(SERVICE_SUFFIX).unwrap_or(name)
}

/// Lower-cases only the first character; the rest is kept as written.
///
/// # Examples
/// ```
/// use protoc_gen_webapi::generation::utils::lower_first;
///
/// assert_eq!(lower_first("OrderHistory"), "orderHistory");
/// assert_eq!(lower_first("HTTPProxy"), "hTTPProxy");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts a schema file path into the logical path used in type imports.
///
/// Strips the `.proto` extension and a leading `./`, and normalizes `\` to `/`.
/// Directory prefixes such as `proto/` are kept since the external type
/// generator mirrors them.
///
/// # Examples
/// ```
/// use protoc_gen_webapi::generation::utils::logical_import_path;
///
/// assert_eq!(
///     logical_import_path("proto/config_center/config_center.proto"),
///     "proto/config_center/config_center"
/// );
/// assert_eq!(logical_import_path("./user.proto"), "user");
/// ```
pub fn logical_import_path(file_path: &str) -> String {
    let path = file_path.strip_suffix(PROTO_EXTENSION).unwrap_or(file_path);
    let path = path.strip_prefix("./").unwrap_or(path);
    path.replace('\\', "/")
}

/// Joins the type-import root and a group path with exactly the separator it needs.
pub fn join_import_path(root: &str, group_path: &str) -> String {
    if root.ends_with('/') || group_path.is_empty() {
        format!("{root}{group_path}")
    } else {
        format!("{root}/{group_path}")
    }
}
