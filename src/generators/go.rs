//! Go client generator

use std::path::PathBuf;

use crate::generation::utils::{to_proper_case, to_snake_case};
use crate::generation::{
    AdditionalProperties, CliOption, CodegenConfig, SchemaType, SupportingFile, TEMPLATE_DIR,
    TemplateFile,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct GoCodegen;

impl CodegenConfig for GoCodegen {
    fn name(&self) -> &'static str {
        "go"
    }

    fn help(&self) -> &'static str {
        "Generates a Go client library"
    }

    fn cli_options(&self) -> Vec<CliOption> {
        vec![
            CliOption::new("packageName", "Go package name (convention: lowercase)")
                .with_default("swagger"),
            CliOption::new("packageVersion", "Go package version").with_default("1.0.0"),
            CliOption::new(
                "hideGenerationTimestamp",
                "Hides the generation timestamp when files are generated",
            )
            .with_default("false"),
            CliOption::new(TEMPLATE_DIR, "Folder containing the template files"),
        ]
    }

    fn model_templates(&self) -> Vec<TemplateFile> {
        vec![TemplateFile {
            template: "model.go.tera",
            suffix: ".go",
        }]
    }

    fn api_templates(&self) -> Vec<TemplateFile> {
        vec![TemplateFile {
            template: "api.go.tera",
            suffix: ".go",
        }]
    }

    fn supporting_files(&self, _options: &AdditionalProperties) -> Vec<SupportingFile> {
        vec![
            SupportingFile::new("README.md.tera", "", "README.md"),
            SupportingFile::new("client.go.tera", "", "client.go"),
        ]
    }

    fn model_folder(&self, _options: &AdditionalProperties) -> PathBuf {
        PathBuf::new()
    }

    fn api_folder(&self, _options: &AdditionalProperties) -> PathBuf {
        PathBuf::new()
    }

    fn type_declaration(&self, schema: &SchemaType) -> String {
        match schema {
            SchemaType::String => "string".to_string(),
            SchemaType::Integer { int64: true } => "int64".to_string(),
            SchemaType::Integer { int64: false } => "int32".to_string(),
            SchemaType::Number { double: true } => "float64".to_string(),
            SchemaType::Number { double: false } => "float32".to_string(),
            SchemaType::Boolean => "bool".to_string(),
            SchemaType::Date | SchemaType::DateTime => "time.Time".to_string(),
            SchemaType::Array(inner) => format!("[]{}", self.type_declaration(inner)),
            SchemaType::Map(inner) => format!("map[string]{}", self.type_declaration(inner)),
            SchemaType::Ref(name) => self.to_model_name(name),
            SchemaType::Object | SchemaType::Any => "interface{}".to_string(),
        }
    }

    fn imports_for(&self, schema: &SchemaType, options: &AdditionalProperties) -> Vec<String> {
        match schema {
            SchemaType::Date | SchemaType::DateTime => vec!["time".to_string()],
            SchemaType::Array(inner) | SchemaType::Map(inner) => self.imports_for(inner, options),
            _ => Vec::new(),
        }
    }

    fn to_model_filename(&self, name: &str) -> String {
        format!("model_{}", to_snake_case(name))
    }

    /// Struct fields and methods are exported
    fn to_var_name(&self, name: &str) -> String {
        to_proper_case(name)
    }

    fn to_operation_name(&self, operation_id: &str) -> String {
        to_proper_case(operation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping() {
        let go = GoCodegen;

        assert_eq!(go.type_declaration(&SchemaType::Integer { int64: true }), "int64");
        assert_eq!(
            go.type_declaration(&SchemaType::Map(Box::new(SchemaType::Ref(
                "pet_tag".to_string()
            )))),
            "map[string]PetTag"
        );
        assert_eq!(
            go.type_declaration(&SchemaType::Array(Box::new(SchemaType::DateTime))),
            "[]time.Time"
        );
        assert_eq!(go.type_declaration(&SchemaType::Any), "interface{}");
    }

    #[test]
    fn test_naming() {
        let go = GoCodegen;

        assert_eq!(go.to_model_filename("PetCategory"), "model_pet_category");
        assert_eq!(go.to_api_filename("pet"), "pet_api");
        assert_eq!(go.to_var_name("petId"), "PetId");
        assert_eq!(go.to_operation_name("listPets"), "ListPets");
    }

    #[test]
    fn test_does_not_declare_model_package() {
        let declared: Vec<String> = GoCodegen.cli_options().into_iter().map(|o| o.opt).collect();

        assert!(declared.contains(&"packageName".to_string()));
        assert!(!declared.contains(&"modelPackage".to_string()));
    }
}
