//! Rust client generator

use std::path::PathBuf;

use crate::generation::utils::{escape_reserved, to_snake_case};
use crate::generation::{
    AdditionalProperties, CliOption, CodegenConfig, SchemaType, SupportingFile, TEMPLATE_DIR,
    TemplateFile,
};

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RustCodegen;

impl CodegenConfig for RustCodegen {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn help(&self) -> &'static str {
        "Generates a Rust client library"
    }

    fn cli_options(&self) -> Vec<CliOption> {
        vec![
            CliOption::new("packageName", "Rust package name (convention: lowercase)")
                .with_default("swagger"),
            CliOption::new("packageVersion", "Rust package version").with_default("1.0.0"),
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
            template: "model.rs.tera",
            suffix: ".rs",
        }]
    }

    fn api_templates(&self) -> Vec<TemplateFile> {
        vec![TemplateFile {
            template: "api.rs.tera",
            suffix: ".rs",
        }]
    }

    fn supporting_files(&self, _options: &AdditionalProperties) -> Vec<SupportingFile> {
        vec![
            SupportingFile::new("Cargo.toml.tera", "", "Cargo.toml"),
            SupportingFile::new("README.md.tera", "", "README.md"),
            SupportingFile::new("lib.rs.tera", "src", "lib.rs"),
            SupportingFile::new("models_mod.rs.tera", "src/models", "mod.rs"),
            SupportingFile::new("apis_mod.rs.tera", "src/apis", "mod.rs"),
        ]
    }

    fn model_folder(&self, _options: &AdditionalProperties) -> PathBuf {
        PathBuf::from("src/models")
    }

    fn api_folder(&self, _options: &AdditionalProperties) -> PathBuf {
        PathBuf::from("src/apis")
    }

    fn type_declaration(&self, schema: &SchemaType) -> String {
        match schema {
            SchemaType::String | SchemaType::Date | SchemaType::DateTime => "String".to_string(),
            SchemaType::Integer { int64: true } => "i64".to_string(),
            SchemaType::Integer { int64: false } => "i32".to_string(),
            SchemaType::Number { double: true } => "f64".to_string(),
            SchemaType::Number { double: false } => "f32".to_string(),
            SchemaType::Boolean => "bool".to_string(),
            SchemaType::Array(inner) => format!("Vec<{}>", self.type_declaration(inner)),
            SchemaType::Map(inner) => format!("HashMap<String, {}>", self.type_declaration(inner)),
            SchemaType::Ref(name) => self.to_model_name(name),
            SchemaType::Object | SchemaType::Any => "serde_json::Value".to_string(),
        }
    }

    fn imports_for(&self, schema: &SchemaType, options: &AdditionalProperties) -> Vec<String> {
        match schema {
            SchemaType::Array(inner) => self.imports_for(inner, options),
            SchemaType::Map(inner) => {
                let mut imports = vec!["std::collections::HashMap".to_string()];
                imports.extend(self.imports_for(inner, options));
                imports
            }
            SchemaType::Ref(name) => vec![format!("crate::models::{}", self.to_model_name(name))],
            _ => Vec::new(),
        }
    }

    fn to_var_name(&self, name: &str) -> String {
        escape_reserved(to_snake_case(name), RESERVED)
    }

    fn to_operation_name(&self, operation_id: &str) -> String {
        escape_reserved(to_snake_case(operation_id), RESERVED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping() {
        let rust = RustCodegen;

        assert_eq!(
            rust.type_declaration(&SchemaType::Array(Box::new(SchemaType::Ref(
                "pet".to_string()
            )))),
            "Vec<Pet>"
        );
        assert_eq!(rust.type_declaration(&SchemaType::DateTime), "String");
        assert_eq!(rust.type_declaration(&SchemaType::Any), "serde_json::Value");
    }

    #[test]
    fn test_imports() {
        let rust = RustCodegen;
        let options = rust.default_options();
        let schema = SchemaType::Map(Box::new(SchemaType::Ref("Tag".to_string())));

        assert_eq!(
            rust.imports_for(&schema, &options),
            vec!["std::collections::HashMap", "crate::models::Tag"]
        );
    }

    #[test]
    fn test_naming() {
        let rust = RustCodegen;

        assert_eq!(rust.to_var_name("type"), "type_");
        assert_eq!(rust.to_var_name("petId"), "pet_id");
        assert_eq!(rust.to_operation_name("findPetsByStatus"), "find_pets_by_status");
        assert_eq!(rust.to_model_filename("PetTag"), "pet_tag");
    }
}
