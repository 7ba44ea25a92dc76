//! Parsed Swagger 2.0 / OpenAPI 3 document
//!
//! Only the parts the generation engine consumes are extracted: API info,
//! base path, model definitions and operations. Swagger 2.0 `definitions`
//! and OpenAPI 3 `components.schemas` are both read as models.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::generation::GenerationError;
use crate::generation::utils::to_camel_case;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

const METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Tag used for operations that declare none
pub const DEFAULT_TAG: &str = "default";

/// API metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// Schema type, reduced to what type mapping needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SchemaType {
    String,
    Integer { int64: bool },
    Number { double: bool },
    Boolean,
    Date,
    DateTime,
    Array(Box<SchemaType>),
    Map(Box<SchemaType>),
    /// Reference to a named model
    Ref(String),
    Object,
    Any,
}

impl SchemaType {
    /// Read a schema object (or a Swagger 2.0 non-body parameter, which
    /// carries `type`/`format` inline)
    pub fn from_schema(schema: &JsonValue) -> Self {
        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            let name = reference.rsplit('/').next().unwrap_or(reference);
            return SchemaType::Ref(name.to_string());
        }

        let format = schema.get("format").and_then(JsonValue::as_str);
        match schema.get("type").and_then(JsonValue::as_str) {
            Some("string") => match format {
                Some("date-time") => SchemaType::DateTime,
                Some("date") => SchemaType::Date,
                _ => SchemaType::String,
            },
            Some("integer") => SchemaType::Integer {
                int64: format == Some("int64"),
            },
            Some("number") => SchemaType::Number {
                double: format != Some("float"),
            },
            Some("boolean") => SchemaType::Boolean,
            Some("array") => SchemaType::Array(Box::new(
                schema
                    .get("items")
                    .map(SchemaType::from_schema)
                    .unwrap_or(SchemaType::Any),
            )),
            Some("object") => match schema.get("additionalProperties") {
                Some(inner) if inner.is_object() => {
                    SchemaType::Map(Box::new(SchemaType::from_schema(inner)))
                }
                _ => SchemaType::Object,
            },
            _ if schema.get("properties").is_some() => SchemaType::Object,
            _ => SchemaType::Any,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SchemaType::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            SchemaType::Array(_) | SchemaType::Map(_) | SchemaType::Ref(_) | SchemaType::Object
        )
    }

    /// Every model name this type refers to, nested ones included
    pub fn referenced_models(&self) -> Vec<&str> {
        match self {
            SchemaType::Ref(name) => vec![name.as_str()],
            SchemaType::Array(inner) | SchemaType::Map(inner) => inner.referenced_models(),
            _ => Vec::new(),
        }
    }
}

/// A property of a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub schema: SchemaType,
    pub required: bool,
    pub description: Option<String>,
}

/// A named model definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
    pub name: String,
    pub description: Option<String>,
    pub properties: Vec<Property>,
}

/// An operation parameter; `location` is one of path, query, header,
/// cookie, formData or body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationParameter {
    pub name: String,
    pub location: String,
    pub required: bool,
    pub schema: SchemaType,
    pub description: Option<String>,
}

/// A single path + method pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub id: String,
    pub path: String,
    pub method: String,
    pub tag: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<OperationParameter>,
    /// Schema of the first 2xx response carrying one
    pub response: Option<SchemaType>,
}

/// Parsed specification document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSpec {
    /// Value of the `swagger` or `openapi` field
    pub version: String,
    pub info: ApiInfo,
    pub base_path: String,
    pub models: Vec<ModelDefinition>,
    pub operations: Vec<Operation>,
}

impl ApiSpec {
    /// Parse a decoded JSON/YAML document
    pub fn from_value(document: JsonValue) -> Result<Self, GenerationError> {
        let root = document.as_object().ok_or_else(|| {
            GenerationError::InvalidSpec("document root is not an object".to_string())
        })?;

        let (version, is_v2) = match (
            root.get("swagger").and_then(JsonValue::as_str),
            root.get("openapi").and_then(JsonValue::as_str),
        ) {
            (Some(v), _) if v.starts_with('2') => (v.to_string(), true),
            (_, Some(v)) if v.starts_with('3') => (v.to_string(), false),
            (Some(v), _) | (_, Some(v)) => {
                return Err(GenerationError::InvalidSpec(format!(
                    "unsupported specification version '{v}'"
                )));
            }
            (None, None) => {
                return Err(GenerationError::InvalidSpec(
                    "missing 'swagger' or 'openapi' version field".to_string(),
                ));
            }
        };

        let info = parse_info(root)?;
        let base_path = if is_v2 {
            v2_base_path(root)
        } else {
            v3_base_path(root)
        };

        let model_schemas = if is_v2 {
            root.get("definitions")
        } else {
            document.pointer("/components/schemas")
        };
        let models = model_schemas
            .and_then(JsonValue::as_object)
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| parse_model(name, schema))
                    .collect()
            })
            .unwrap_or_default();

        let operations = parse_operations(&document)?;

        Ok(Self {
            version,
            info,
            base_path,
            models,
            operations,
        })
    }

    /// Tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for op in &self.operations {
            if !tags.contains(&op.tag.as_str()) {
                tags.push(&op.tag);
            }
        }
        tags
    }

    /// Operations carrying `tag`
    pub fn operations_for_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Operation> {
        self.operations.iter().filter(move |op| op.tag == tag)
    }
}

fn parse_info(root: &Map<String, JsonValue>) -> Result<ApiInfo, GenerationError> {
    let info = root
        .get("info")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| GenerationError::InvalidSpec("missing 'info' object".to_string()))?;

    let field = |name: &str| {
        info.get(name)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| GenerationError::InvalidSpec(format!("missing 'info.{name}'")))
    };

    Ok(ApiInfo {
        title: field("title")?,
        version: field("version")?,
        description: info
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
    })
}

fn v2_base_path(root: &Map<String, JsonValue>) -> String {
    let base = root
        .get("basePath")
        .and_then(JsonValue::as_str)
        .unwrap_or("/");
    match root.get("host").and_then(JsonValue::as_str) {
        Some(host) => {
            let scheme = root
                .get("schemes")
                .and_then(JsonValue::as_array)
                .and_then(|schemes| schemes.first())
                .and_then(JsonValue::as_str)
                .unwrap_or("http");
            format!("{scheme}://{host}{base}")
        }
        None => base.to_string(),
    }
}

fn v3_base_path(root: &Map<String, JsonValue>) -> String {
    root.get("servers")
        .and_then(JsonValue::as_array)
        .and_then(|servers| servers.first())
        .and_then(|server| server.get("url"))
        .and_then(JsonValue::as_str)
        .unwrap_or("/")
        .to_string()
}

fn parse_model(name: &str, schema: &JsonValue) -> ModelDefinition {
    let mut properties = Vec::new();

    // Inline allOf members contribute their properties; referenced parents are
    // left to the generator templates.
    let mut parts = vec![schema];
    if let Some(all_of) = schema.get("allOf").and_then(JsonValue::as_array) {
        parts.extend(all_of.iter().filter(|part| part.get("$ref").is_none()));
    }

    for part in parts {
        let required: Vec<&str> = part
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        if let Some(props) = part.get("properties").and_then(JsonValue::as_object) {
            for (prop_name, prop_schema) in props {
                properties.push(Property {
                    name: prop_name.clone(),
                    schema: SchemaType::from_schema(prop_schema),
                    required: required.contains(&prop_name.as_str()),
                    description: prop_schema
                        .get("description")
                        .and_then(JsonValue::as_str)
                        .map(str::to_string),
                });
            }
        }
    }

    ModelDefinition {
        name: name.to_string(),
        description: schema
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        properties,
    }
}

/// Follow a local `$ref` such as `#/parameters/limit`
fn resolve_local<'a>(document: &'a JsonValue, value: &'a JsonValue) -> &'a JsonValue {
    value
        .get("$ref")
        .and_then(JsonValue::as_str)
        .and_then(|reference| reference.strip_prefix('#'))
        .and_then(|pointer| document.pointer(pointer))
        .unwrap_or(value)
}

fn parse_parameter(document: &JsonValue, raw: &JsonValue) -> Option<OperationParameter> {
    let param = resolve_local(document, raw);
    let name = param.get("name").and_then(JsonValue::as_str)?;
    let location = param.get("in").and_then(JsonValue::as_str)?;
    let schema = param
        .get("schema")
        .map(SchemaType::from_schema)
        .unwrap_or_else(|| SchemaType::from_schema(param));

    Some(OperationParameter {
        name: name.to_string(),
        location: location.to_string(),
        required: location == "path"
            || param
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        schema,
        description: param
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
    })
}

/// First schema found under an OpenAPI 3 `content` map
fn content_schema(holder: &JsonValue) -> Option<SchemaType> {
    holder
        .get("content")
        .and_then(JsonValue::as_object)
        .and_then(|content| content.values().find_map(|media| media.get("schema")))
        .map(SchemaType::from_schema)
}

fn parse_operations(document: &JsonValue) -> Result<Vec<Operation>, GenerationError> {
    let Some(paths) = document.get("paths") else {
        return Ok(Vec::new());
    };
    let paths = paths
        .as_object()
        .ok_or_else(|| GenerationError::InvalidSpec("'paths' is not an object".to_string()))?;

    let mut operations = Vec::new();
    for (path, item) in paths {
        let shared: Vec<&JsonValue> = item
            .get("parameters")
            .and_then(JsonValue::as_array)
            .map(|params| params.iter().collect())
            .unwrap_or_default();

        for method in METHODS {
            let Some(op) = item.get(method) else {
                continue;
            };

            let mut parameters: Vec<OperationParameter> = Vec::new();
            let own = op
                .get("parameters")
                .and_then(JsonValue::as_array)
                .map(|params| params.iter().collect::<Vec<_>>())
                .unwrap_or_default();
            for raw in own.into_iter().chain(shared.iter().copied()) {
                if let Some(param) = parse_parameter(document, raw) {
                    // Operation-level parameters shadow path-level ones
                    if !parameters
                        .iter()
                        .any(|p| p.name == param.name && p.location == param.location)
                    {
                        parameters.push(param);
                    }
                }
            }

            if let Some(body) = op.get("requestBody") {
                let body = resolve_local(document, body);
                parameters.push(OperationParameter {
                    name: "body".to_string(),
                    location: "body".to_string(),
                    required: body
                        .get("required")
                        .and_then(JsonValue::as_bool)
                        .unwrap_or(false),
                    schema: content_schema(body).unwrap_or(SchemaType::Any),
                    description: body
                        .get("description")
                        .and_then(JsonValue::as_str)
                        .map(str::to_string),
                });
            }

            let response = op
                .get("responses")
                .and_then(JsonValue::as_object)
                .and_then(|responses| {
                    responses
                        .iter()
                        .filter(|(code, _)| code.starts_with('2'))
                        .find_map(|(_, response)| {
                            let response = resolve_local(document, response);
                            response
                                .get("schema")
                                .map(SchemaType::from_schema)
                                .or_else(|| content_schema(response))
                        })
                });

            let id = op
                .get("operationId")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    to_camel_case(&NON_IDENT.replace_all(&format!("{method} {path}"), "_"))
                });

            let tag = op
                .get("tags")
                .and_then(JsonValue::as_array)
                .and_then(|tags| tags.first())
                .and_then(JsonValue::as_str)
                .unwrap_or(DEFAULT_TAG)
                .to_string();

            operations.push(Operation {
                id,
                path: path.clone(),
                method: method.to_uppercase(),
                tag,
                summary: op
                    .get("summary")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string),
                description: op
                    .get("description")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string),
                parameters,
                response,
            });
        }
    }

    Ok(operations)
}
