//! swagger-codegen-plugin CLI entrypoint
//! Parses command-line arguments and runs the code generation goal.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use swagger_codegen_plugin::application::PluginConfig;
use swagger_codegen_plugin::generators::GeneratorRegistry;
use swagger_codegen_plugin::infrastructure::build::{CargoBuildHost, ProjectBuildHost};
use swagger_codegen_plugin::infrastructure::default_codegen_goal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-codegen-plugin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate sources from a Swagger/OpenAPI specification
    Generate(GenerateArgs),
    /// List the available generators
    Langs,
    /// Show the options a generator recognizes
    ConfigHelp {
        /// Generator name
        #[arg(short, long)]
        lang: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Generator name, or the type identifier of a registered generator
    #[arg(short, long)]
    lang: Option<String>,
    /// Specification file path or http(s) URL
    #[arg(short, long)]
    input_spec: Option<String>,
    /// Output directory [default: <build-dir>/generated-sources/swagger]
    #[arg(short, long, env = "SWAGGER_CODEGEN_OUTPUT")]
    output: Option<PathBuf>,
    /// Directory of templates that take precedence over the built-in ones
    #[arg(short, long)]
    template_directory: Option<PathBuf>,
    /// JSON (or YAML) file of generator option overrides
    #[arg(short, long)]
    config_file: Option<PathBuf>,
    /// Register the output directory as a compile source root [default: true]
    #[arg(long)]
    add_compile_source_root: Option<bool>,
    /// Build directory of the host project
    #[arg(long, default_value = "target")]
    build_dir: PathBuf,
    /// Report the source root to cargo (for use from a build script)
    #[arg(long)]
    cargo: bool,
    /// YAML file holding the goal configuration; flags take precedence
    #[arg(long)]
    plugin_config: Option<PathBuf>,
}

impl GenerateArgs {
    fn flags(&self) -> PluginConfig {
        PluginConfig {
            language: self.lang.clone(),
            input_spec: self.input_spec.clone(),
            output: self.output.clone(),
            template_directory: self.template_directory.clone(),
            config_file: self.config_file.clone(),
            add_compile_source_root: self.add_compile_source_root,
        }
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let file_config = match &args.plugin_config {
        Some(path) => PluginConfig::from_file(path)
            .with_context(|| format!("Failed to load plugin config {}", path.display()))?,
        None => PluginConfig::default(),
    };

    let mut project = ProjectBuildHost::new(&args.build_dir);
    let request = file_config
        .merge(args.flags())
        .into_request(project.default_output_dir())
        .context("Invalid generate invocation")?;
    debug!(?request, "Resolved invocation parameters");

    let goal = default_codegen_goal().context("Failed to initialize code generation")?;

    let response = if args.cargo {
        let mut host = CargoBuildHost::stdout();
        goal.execute(request, &mut host).await?
    } else {
        let response = goal.execute(request, &mut project).await?;
        for root in project.compile_source_roots() {
            info!(root = %root.display(), "Compile source root");
        }
        println!(
            "Generated {} files into {}",
            response.files.len(),
            response.output_dir.display()
        );
        response
    };

    info!(
        generator = %response.generator,
        files = response.files.len(),
        output = %response.output_dir.display(),
        "Code generation completed"
    );
    Ok(())
}

fn config_help(lang: &str) -> anyhow::Result<()> {
    let generator = GeneratorRegistry::with_defaults().resolve(lang)?;

    println!("{}: {}", generator.name(), generator.help());
    println!();
    println!("CONFIG OPTIONS");
    for option in generator.cli_options() {
        println!("\t{}", option.opt);
        match &option.default {
            Some(default) => println!("\t    {} (Default: {})", option.description, default),
            None => println!("\t    {}", option.description),
        }
        println!();
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO; stdout is kept for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args).await?,
        Commands::Langs => {
            for name in GeneratorRegistry::with_defaults().names() {
                println!("{name}");
            }
        }
        Commands::ConfigHelp { lang } => config_help(&lang)?,
    }

    Ok(())
}
