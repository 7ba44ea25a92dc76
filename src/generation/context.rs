//! Render contexts handed to the templates
//!
//! Every value here is derived from the parsed spec through the generator's
//! naming and type-mapping hooks, so templates never see raw schema names.

use serde_json::{Map, Value as JsonValue, json};
use std::collections::BTreeSet;

use crate::generation::utils::to_proper_case;
use crate::generation::{
    AdditionalProperties, CodegenConfig, ModelDefinition, Operation, OperationParameter, Property,
};

/// Variables available to a template
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: Map<String, JsonValue>,
}

impl RenderContext {
    /// Seed a context with every option of the run
    pub fn from_options(options: &AdditionalProperties) -> Self {
        let mut context = Self::default();
        for (key, value) in options.iter() {
            context.add_variable(key, value.clone());
        }
        context
    }

    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }
}

fn property_context(config: &dyn CodegenConfig, property: &Property) -> JsonValue {
    json!({
        "name": config.to_var_name(&property.name),
        "base_name": property.name,
        "getter": format!("get{}", to_proper_case(&property.name)),
        "setter": format!("set{}", to_proper_case(&property.name)),
        "data_type": config.type_declaration(&property.schema),
        "required": property.required,
        "description": property.description,
        "is_array": property.schema.is_array(),
        "is_primitive": property.schema.is_primitive(),
    })
}

fn parameter_context(config: &dyn CodegenConfig, param: &OperationParameter) -> JsonValue {
    json!({
        "name": config.to_var_name(&param.name),
        "base_name": param.name,
        "location": param.location,
        "data_type": config.type_declaration(&param.schema),
        "required": param.required,
        "description": param.description,
        "is_array": param.schema.is_array(),
    })
}

/// Context for one model file
pub fn model_context(
    config: &dyn CodegenConfig,
    options: &AdditionalProperties,
    model: &ModelDefinition,
) -> JsonValue {
    let own_name = config.to_model_name(&model.name);
    // A model never imports itself
    let imports: BTreeSet<String> = model
        .properties
        .iter()
        .flat_map(|p| config.imports_for(&p.schema, options))
        .filter(|import| {
            !import.ends_with(&format!(".{own_name}")) && !import.ends_with(&format!("::{own_name}"))
        })
        .collect();

    json!({
        "name": model.name,
        "class_name": own_name,
        "file_name": config.to_model_filename(&model.name),
        "description": model.description,
        "vars": model
            .properties
            .iter()
            .map(|p| property_context(config, p))
            .collect::<Vec<_>>(),
        "imports": imports,
    })
}

fn operation_context(config: &dyn CodegenConfig, op: &Operation) -> JsonValue {
    let params_in = |location: &str| {
        op.parameters
            .iter()
            .filter(|p| p.location == location)
            .map(|p| parameter_context(config, p))
            .collect::<Vec<_>>()
    };
    let body = op
        .parameters
        .iter()
        .find(|p| p.location == "body")
        .map(|p| parameter_context(config, p));

    json!({
        "operation_id": op.id,
        "nickname": config.to_operation_name(&op.id),
        "http_method": op.method,
        "path": op.path,
        "summary": op.summary,
        "notes": op.description,
        "return_type": op.response.as_ref().map(|schema| config.type_declaration(schema)),
        "all_params": op
            .parameters
            .iter()
            .map(|p| parameter_context(config, p))
            .collect::<Vec<_>>(),
        "path_params": params_in("path"),
        "query_params": params_in("query"),
        "header_params": params_in("header"),
        "form_params": params_in("formData"),
        "has_body": body.is_some(),
        "body_param": body,
    })
}

/// Context for one API file: every operation sharing `tag`
pub fn api_context<'a>(
    config: &dyn CodegenConfig,
    options: &AdditionalProperties,
    tag: &str,
    operations: impl IntoIterator<Item = &'a Operation>,
) -> JsonValue {
    let operations: Vec<&Operation> = operations.into_iter().collect();
    let imports: BTreeSet<String> = operations
        .iter()
        .flat_map(|op| {
            op.parameters
                .iter()
                .map(|p| &p.schema)
                .chain(op.response.as_ref())
        })
        .flat_map(|schema| config.imports_for(schema, options))
        .collect();

    json!({
        "base_name": tag,
        "class_name": config.to_api_name(tag),
        "file_name": config.to_api_filename(tag),
        "operations": operations
            .iter()
            .map(|op| operation_context(config, op))
            .collect::<Vec<_>>(),
        "imports": imports,
    })
}
