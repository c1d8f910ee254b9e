use axum::Json;
use utoipa::openapi::path::{Operation, ParameterBuilder, ParameterIn, PathItem};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{Object, Type};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{RefOr, Required};
use utoipa::{Modify, OpenApi};

use crate::middleware::GEO_COMPANY_PARAM;
use crate::modules::v1::model::{HealthResponse, MessageResponse};

/// Name of the security scheme guarding tenant-scoped routes.
pub const SECURITY_SCHEME: &str = "GeoCompanyTokenAuth";

/// Mount point of the tenant-scoped router.
pub const TENANT_PREFIX: &str = "/geo_companies/{geo_company_id}";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::v1::controller::root,
        crate::modules::v1::controller::health,
    ),
    components(schemas(MessageResponse, HealthResponse)),
    modifiers(&SecurityAddon, &TenantScopedPaths),
    tags(
        (name = "v1", description = "Version 1 endpoints")
    ),
    info(
        title = "Template App API",
        version = "0.1.0",
        description = "Service template with tenant-scoped token authentication and structured request logging.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                SECURITY_SCHEME,
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            )
        }
    }
}

/// Publishes every `/v1` operation a second time under the tenant prefix,
/// with the tenant path parameter and the token security requirement.
struct TenantScopedPaths;

impl Modify for TenantScopedPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let scoped: Vec<(String, PathItem)> = openapi
            .paths
            .paths
            .iter()
            .filter(|(path, _)| path.starts_with("/v1"))
            .map(|(path, item)| {
                let mut item = item.clone();
                for operation in operations_mut(&mut item) {
                    scope_operation(operation);
                }
                (format!("{TENANT_PREFIX}{path}"), item)
            })
            .collect();

        openapi.paths.paths.extend(scoped);
    }
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.patch,
    ]
    .into_iter()
    .filter_map(Option::as_mut)
}

fn scope_operation(operation: &mut Operation) {
    if let Some(id) = operation.operation_id.as_mut() {
        id.insert_str(0, "geo_company_");
    }

    let param = ParameterBuilder::new()
        .name(GEO_COMPANY_PARAM)
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Geo company the request acts for"))
        .schema(Some(Object::with_type(Type::String)))
        .build();
    operation
        .parameters
        .get_or_insert_with(Vec::new)
        .insert(0, param);

    operation
        .security
        .get_or_insert_with(Vec::new)
        .push(SecurityRequirement::new(SECURITY_SCHEME, Vec::<String>::new()));

    operation.responses.responses.insert(
        "403".to_string(),
        RefOr::T(
            ResponseBuilder::new()
                .description("Missing geo company or Authorization header")
                .build(),
        ),
    );
}

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
