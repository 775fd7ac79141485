//! Tera-based renderer for the generated API wrapper files

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::generation::utils::join_import_path;
use crate::generation::{ApiRenderer, Flavor, GenerationError, RenderJob, ServiceUnit};

const TYPED_TEMPLATE: &str = "typed_api.ts";
const UNTYPED_TEMPLATE: &str = "untyped_api.js";

/// Template names end in `.ts`/`.js`, so Tera's HTML autoescaping never applies.
const TEMPLATES: [(&str, &str); 2] = [
    (
        TYPED_TEMPLATE,
        include_str!("../../../templates/typed_api.ts.tera"),
    ),
    (
        UNTYPED_TEMPLATE,
        include_str!("../../../templates/untyped_api.js.tera"),
    ),
];

#[derive(Serialize)]
struct ApiView<'a> {
    service_import: &'a str,
    api_name: String,
    type_imports: Vec<TypeImportView<'a>>,
    methods: Vec<MethodView<'a>>,
}

#[derive(Serialize)]
struct TypeImportView<'a> {
    source: String,
    names: Vec<&'a str>,
}

#[derive(Serialize)]
struct MethodView<'a> {
    name: &'a str,
    verb: &'static str,
    path: &'a str,
    request_type: &'a str,
    response_type: &'a str,
}

/// Renders one service into the typed or untyped wrapper shape
pub struct TeraApiRenderer {
    tera: Tera,
}

impl TeraApiRenderer {
    pub fn new() -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES).map_err(|e| GenerationError::Render {
            template: "<embedded>".to_string(),
            message: describe(&e),
        })?;
        Ok(Self { tera })
    }

    fn template_name(flavor: Flavor) -> &'static str {
        match flavor {
            Flavor::Typed => TYPED_TEMPLATE,
            Flavor::Untyped => UNTYPED_TEMPLATE,
        }
    }
}

impl ApiRenderer for TeraApiRenderer {
    fn render(&self, unit: &ServiceUnit, job: &RenderJob) -> Result<String, GenerationError> {
        let template = Self::template_name(job.flavor);

        let type_imports = match (job.flavor, job.types.as_ref()) {
            (Flavor::Typed, Some(types)) => types
                .groups
                .iter()
                .map(|(path, names)| TypeImportView {
                    source: join_import_path(&types.root, path),
                    names,
                })
                .collect(),
            _ => Vec::new(),
        };

        let view = ApiView {
            service_import: &job.service_import,
            api_name: unit.api_name(),
            type_imports,
            methods: unit
                .bindings
                .iter()
                .map(|binding| MethodView {
                    name: &binding.method_name,
                    verb: binding.verb.as_str(),
                    path: &binding.path,
                    request_type: &binding.request.name,
                    response_type: &binding.response.name,
                })
                .collect(),
        };

        let context = TeraContext::from_serialize(&view).map_err(|e| GenerationError::Render {
            template: template.to_string(),
            message: describe(&e),
        })?;
        let rendered = self
            .tera
            .render(template, &context)
            .map_err(|e| GenerationError::Render {
                template: template.to_string(),
                message: describe(&e),
            })?;

        // exactly one trailing newline regardless of how the template file ends
        let mut content = rendered.trim_end().to_string();
        content.push('\n');
        Ok(content)
    }
}

/// Tera nests the useful part of its errors in the source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MessageRef;
    use crate::generation::{HttpVerb, ImportGroup, MethodBinding, TypeImports};
    use std::path::PathBuf;

    fn binding(name: &str, verb: HttpVerb, path: &str, file: &str) -> MethodBinding {
        MethodBinding {
            method_name: name.to_string(),
            verb,
            path: path.to_string(),
            request: MessageRef::new(format!("{name}Req"), file),
            response: MessageRef::new(format!("{name}Resp"), file),
        }
    }

    fn typed_job(service_import: &str, root: &str, groups: ImportGroup) -> RenderJob {
        RenderJob {
            flavor: Flavor::Typed,
            target_dir: PathBuf::from("src/api"),
            service_import: service_import.to_string(),
            types: Some(TypeImports {
                root: root.to_string(),
                groups,
            }),
        }
    }

    fn untyped_job(service_import: &str) -> RenderJob {
        RenderJob {
            flavor: Flavor::Untyped,
            target_dir: PathBuf::from("src/js"),
            service_import: service_import.to_string(),
            types: None,
        }
    }

    #[test]
    fn test_typed_single_method() {
        let unit = ServiceUnit::new(
            "UserService",
            vec![MethodBinding {
                method_name: "GetUser".to_string(),
                verb: HttpVerb::Post,
                path: "/api/UserService/GetUser".to_string(),
                request: MessageRef::new("GetUserReq", "proto/user/user.proto"),
                response: MessageRef::new("GetUserResp", "proto/user/user.proto"),
            }],
        );
        let mut groups = ImportGroup::default();
        groups.insert("proto/user/user", "GetUserReq");
        groups.insert("proto/user/user", "GetUserResp");

        let renderer = TeraApiRenderer::new().unwrap();
        let output = renderer
            .render(&unit, &typed_job("@/api/api", "@/api/proto-types", groups))
            .unwrap();

        assert_eq!(
            output,
            "import service from '@/api/api';\n\
             import type { GetUserReq, GetUserResp } from '@/api/proto-types/proto/user/user';\n\
             \n\
             export const userApi = {\n\
            \x20 GetUser: (data: GetUserReq): Promise<GetUserResp> =>\n\
            \x20   service.post('/api/UserService/GetUser', data)\n\
             };\n\
             \n\
             export default userApi;\n"
        );
    }

    #[test]
    fn test_typed_multiple_groups_and_methods() {
        let unit = ServiceUnit::new(
            "OrderService",
            vec![
                binding("Create", HttpVerb::Post, "/orders", "proto/order.proto"),
                binding("Remove", HttpVerb::Delete, "/orders/{id}", "proto/order.proto"),
            ],
        );
        let mut groups = ImportGroup::default();
        groups.insert("proto/order", "CreateReq");
        groups.insert("proto/common", "Empty");

        let renderer = TeraApiRenderer::new().unwrap();
        let output = renderer
            .render(&unit, &typed_job("./api", "@/types/", groups))
            .unwrap();

        let expected = [
            "import service from './api';",
            "import type { Empty } from '@/types/proto/common';",
            "import type { CreateReq } from '@/types/proto/order';",
            "",
            "export const orderApi = {",
            "  Create: (data: CreateReq): Promise<CreateResp> =>",
            "    service.post('/orders', data),",
            "  Remove: (data: RemoveReq): Promise<RemoveResp> =>",
            "    service.delete('/orders/{id}', data)",
            "};",
            "",
            "export default orderApi;",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_typed_without_type_groups() {
        let unit = ServiceUnit::new(
            "Health",
            vec![binding("Check", HttpVerb::Get, "/health", "")],
        );
        let renderer = TeraApiRenderer::new().unwrap();
        let output = renderer
            .render(&unit, &typed_job("./api", "@/types", ImportGroup::default()))
            .unwrap();

        assert!(output.starts_with("import service from './api';\n\nexport const healthApi = {\n"));
    }

    #[test]
    fn test_untyped_shape() {
        let unit = ServiceUnit::new(
            "UserService",
            vec![
                binding("GetUser", HttpVerb::Post, "/api/UserService/GetUser", "u.proto"),
                binding("ListUsers", HttpVerb::Get, "/api/users", "u.proto"),
            ],
        );
        let renderer = TeraApiRenderer::new().unwrap();
        let output = renderer.render(&unit, &untyped_job("@/api/api.js")).unwrap();

        let expected = [
            "import service from '@/api/api.js';",
            "",
            "export const userApi = {",
            "    GetUser: (data) => service.post('/api/UserService/GetUser', data),",
            "    ListUsers: (data) => service.get('/api/users', data)",
            "};",
            "",
            "export default userApi;",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_untyped_ignores_type_plan() {
        let unit = ServiceUnit::new("A", vec![binding("M", HttpVerb::Put, "/m", "a.proto")]);
        let mut job = untyped_job("./api");
        let mut groups = ImportGroup::default();
        groups.insert("a", "MReq");
        job.types = Some(TypeImports {
            root: "@/types".to_string(),
            groups,
        });

        let output = TeraApiRenderer::new().unwrap().render(&unit, &job).unwrap();
        assert!(!output.contains("import type"));
        assert!(output.contains("    M: (data) => service.put('/m', data)\n};"));
    }

    #[test]
    fn test_rendering_is_not_html_escaped() {
        let unit = ServiceUnit::new(
            "Search",
            vec![binding("Find", HttpVerb::Get, "/search?q=<a>&b", "s.proto")],
        );
        let output = TeraApiRenderer::new()
            .unwrap()
            .render(&unit, &untyped_job("@/api/api"))
            .unwrap();
        assert!(output.contains("service.get('/search?q=<a>&b', data)"));
    }
}
