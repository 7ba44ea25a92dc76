//! Java client generator

use std::path::PathBuf;

use crate::generation::utils::{escape_reserved, to_camel_case};
use crate::generation::{
    AdditionalProperties, CliOption, CodegenConfig, SchemaType, SupportingFile, TEMPLATE_DIR,
    TemplateFile,
};

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
];

const DEFAULT_MODEL_PACKAGE: &str = "io.swagger.client.model";
const DEFAULT_API_PACKAGE: &str = "io.swagger.client.api";

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaCodegen;

impl JavaCodegen {
    fn package_folder(options: &AdditionalProperties, key: &str, default: &str) -> PathBuf {
        let package = options.get_str(key).unwrap_or(default);
        package
            .split('.')
            .fold(PathBuf::from("src/main/java"), |path, segment| path.join(segment))
    }
}

impl CodegenConfig for JavaCodegen {
    fn name(&self) -> &'static str {
        "java"
    }

    fn help(&self) -> &'static str {
        "Generates a Java client library"
    }

    fn cli_options(&self) -> Vec<CliOption> {
        vec![
            CliOption::new("modelPackage", "package for generated models")
                .with_default(DEFAULT_MODEL_PACKAGE),
            CliOption::new("apiPackage", "package for generated api classes")
                .with_default(DEFAULT_API_PACKAGE),
            CliOption::new("invokerPackage", "root package for generated code")
                .with_default("io.swagger.client"),
            CliOption::new("groupId", "groupId in generated pom.xml").with_default("io.swagger"),
            CliOption::new("artifactId", "artifactId in generated pom.xml")
                .with_default("swagger-java-client"),
            CliOption::new("artifactVersion", "artifact version in generated pom.xml")
                .with_default("1.0.0"),
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
            template: "model.java.tera",
            suffix: ".java",
        }]
    }

    fn api_templates(&self) -> Vec<TemplateFile> {
        vec![TemplateFile {
            template: "api.java.tera",
            suffix: ".java",
        }]
    }

    fn supporting_files(&self, _options: &AdditionalProperties) -> Vec<SupportingFile> {
        vec![
            SupportingFile::new("pom.xml.tera", "", "pom.xml"),
            SupportingFile::new("README.md.tera", "", "README.md"),
        ]
    }

    fn model_folder(&self, options: &AdditionalProperties) -> PathBuf {
        Self::package_folder(options, "modelPackage", DEFAULT_MODEL_PACKAGE)
    }

    fn api_folder(&self, options: &AdditionalProperties) -> PathBuf {
        Self::package_folder(options, "apiPackage", DEFAULT_API_PACKAGE)
    }

    fn type_declaration(&self, schema: &SchemaType) -> String {
        match schema {
            SchemaType::String => "String".to_string(),
            SchemaType::Integer { int64: true } => "Long".to_string(),
            SchemaType::Integer { int64: false } => "Integer".to_string(),
            SchemaType::Number { double: true } => "Double".to_string(),
            SchemaType::Number { double: false } => "Float".to_string(),
            SchemaType::Boolean => "Boolean".to_string(),
            SchemaType::Date => "LocalDate".to_string(),
            SchemaType::DateTime => "OffsetDateTime".to_string(),
            SchemaType::Array(inner) => format!("List<{}>", self.type_declaration(inner)),
            SchemaType::Map(inner) => format!("Map<String, {}>", self.type_declaration(inner)),
            SchemaType::Ref(name) => self.to_model_name(name),
            SchemaType::Object | SchemaType::Any => "Object".to_string(),
        }
    }

    fn imports_for(&self, schema: &SchemaType, options: &AdditionalProperties) -> Vec<String> {
        match schema {
            SchemaType::Date => vec!["java.time.LocalDate".to_string()],
            SchemaType::DateTime => vec!["java.time.OffsetDateTime".to_string()],
            SchemaType::Array(inner) => {
                let mut imports = vec!["java.util.List".to_string()];
                imports.extend(self.imports_for(inner, options));
                imports
            }
            SchemaType::Map(inner) => {
                let mut imports = vec!["java.util.Map".to_string()];
                imports.extend(self.imports_for(inner, options));
                imports
            }
            SchemaType::Ref(name) => {
                let package = options
                    .get_str("modelPackage")
                    .unwrap_or(DEFAULT_MODEL_PACKAGE);
                vec![format!("{package}.{}", self.to_model_name(name))]
            }
            _ => Vec::new(),
        }
    }

    /// One public class per file, named after the class
    fn to_model_filename(&self, name: &str) -> String {
        self.to_model_name(name)
    }

    fn to_api_filename(&self, tag: &str) -> String {
        self.to_api_name(tag)
    }

    fn to_var_name(&self, name: &str) -> String {
        escape_reserved(to_camel_case(name), RESERVED)
    }

    fn to_operation_name(&self, operation_id: &str) -> String {
        escape_reserved(to_camel_case(operation_id), RESERVED)
    }
}
