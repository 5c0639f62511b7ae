//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{error_json, Conversion, ConvertOptions, ConvertService};
use crate::application::{EncodingChoice, Source};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::render;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::read_piped;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Convert {
            input,
            compact,
            output: target,
            error_json: as_json,
        }) => {
            let result = cmd_convert(&project_dir, input, *compact, target.as_deref());
            if *as_json {
                if let Err(e) = &result {
                    output::info(&error_json(&e.to_string()));
                }
            }
            result
        }
        Some(Commands::Render {
            input,
            output: target,
        }) => cmd_render(&project_dir, input, target.as_deref()),
        Some(Commands::Config { command }) => cmd_config(&project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "tree2json", &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn services(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

/// Command-line flags on top of configured defaults.
fn convert_options(settings: &Settings, input: &InputArgs) -> ConvertOptions {
    let mut options = ConvertOptions::from(settings);
    if let Some(encoding) = &input.encoding {
        options.encoding = EncodingChoice::new(encoding, &settings.fallback_encoding);
    }
    if input.no_normalize {
        options.normalize = false;
    }
    if let Some(duplicates) = input.duplicates {
        options.duplicates = duplicates.into();
    }
    options
}

fn resolve_source(settings: &Settings, input: &InputArgs) -> CliResult<Source> {
    let arg = input
        .source
        .as_deref()
        .or(settings.source.as_deref())
        .ok_or_else(|| {
            CliError::Usage(
                "no source given: pass a file, '-' for stdin or a URL, or set `source` in config"
                    .into(),
            )
        })?;
    Ok(Source::from_arg(arg)?)
}

fn run_conversion(
    service: &ConvertService,
    source: &Source,
    options: &ConvertOptions,
) -> CliResult<Conversion> {
    let conversion = match source {
        Source::Stdin => {
            let bytes = read_piped(io::stdin().lock())?;
            service.convert_bytes(&bytes, options)?
        }
        _ => service.convert(source, options)?,
    };
    if conversion.lossy {
        output::warning(&format!(
            "{source}: undecodable bytes replaced with U+FFFD (decoded as {})",
            conversion.encoding
        ));
    }
    Ok(conversion)
}

fn emit(service: &ConvertService, content: &str, target: Option<&Path>) -> CliResult<()> {
    match target {
        Some(path) => {
            service.write_output(path, content)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => output::info(content.trim_end_matches('\n')),
    }
    Ok(())
}

#[instrument(skip(input))]
fn cmd_convert(
    project_dir: &Path,
    input: &InputArgs,
    compact: bool,
    target: Option<&Path>,
) -> CliResult<()> {
    let container = services(project_dir)?;
    let service = container.convert_service();
    let source = resolve_source(&container.settings, input)?;
    let options = convert_options(&container.settings, input);
    debug!("convert {} with {:?}", source, options);

    let conversion = run_conversion(&service, &source, &options)?;
    let pretty = container.settings.pretty && !compact;
    let json = service.to_json(&conversion.tree, pretty)?;
    emit(&service, &json, target)
}

#[instrument(skip(input))]
fn cmd_render(project_dir: &Path, input: &InputArgs, target: Option<&Path>) -> CliResult<()> {
    let container = services(project_dir)?;
    let service = container.convert_service();
    let source = resolve_source(&container.settings, input)?;
    let options = convert_options(&container.settings, input);

    let conversion = run_conversion(&service, &source, &options)?;
    emit(&service, &render(&conversion.tree), target)
}

fn cmd_config(project_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let container = services(project_dir)?;
            output::info(container.settings.to_toml()?.trim_end());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path: PathBuf = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(project_dir)
            };
            let container = ServiceContainer::new(Settings::default());
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let describe = |p: &Path| {
                let state = if p.exists() { "exists" } else { "not found" };
                format!("{} ({state})", p.display())
            };
            match global_config_path() {
                Some(p) => output::labeled("global", &describe(p.as_path())),
                None => output::labeled("global", "unavailable"),
            }
            output::labeled("local", &describe(local_config_path(project_dir).as_path()));
            Ok(())
        }
    }
}
