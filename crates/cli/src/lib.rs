//! The CLI of the query compiler: manage a configuration directory and compile requests
//! against it.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use query_compiler_configuration as configuration;
use query_compiler_configuration::ParsedConfiguration;
use query_engine_translation::translation;
use query_engine_translation::translation::parameters::QueryParameters;

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Initialize a configuration in the context directory.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON schema of the configuration file.
    Schema,
    /// Compile a request against a configured entity and print the query plan.
    Compile {
        /// The name of the entity, as configured.
        #[arg(long)]
        entity: String,
        /// The query string of the request, e.g. `searchTerm=john&page=2`.
        #[arg(long)]
        query: String,
    },
}

/// The information needed to run a command.
#[derive(Debug, Clone)]
pub struct Context {
    /// The directory holding the configuration.
    pub context_path: PathBuf,
}

/// Run a command in a given directory, writing anything it prints to `output`.
pub async fn run(command: Command, context: &Context, output: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Initialize { force } => initialize(context, force).await?,
        Command::Schema => schema(output)?,
        Command::Compile { entity, query } => compile(context, &entity, &query, output).await?,
    };
    Ok(())
}

/// Write an empty configuration and its schema into the context directory.
async fn initialize(context: &Context, force: bool) -> anyhow::Result<()> {
    let configuration_file = context
        .context_path
        .join(configuration::CONFIGURATION_FILENAME);
    if !force && tokio::fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "A configuration already exists at {}. Use --force to overwrite it.",
            configuration_file.display()
        );
    }

    configuration::write_parsed_configuration(
        ParsedConfiguration::initial(),
        &context.context_path,
    )
    .await?;
    tracing::info!(path = %context.context_path.display(), "initialized configuration");
    Ok(())
}

fn schema(output: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *output, &configuration::generate_latest_schema())?;
    writeln!(output)?;
    Ok(())
}

/// Translate a query string with the configuration of the context directory.
async fn compile(
    context: &Context,
    entity: &str,
    query: &str,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let parsed_configuration = configuration::parse_configuration(&context.context_path).await?;
    let runtime_configuration = configuration::make_runtime_configuration(parsed_configuration)?;

    let parameters = QueryParameters::from_query_string(query);
    let plan = translation::query::translate_for_entity(
        &runtime_configuration.metadata,
        entity,
        &parameters,
    )?;

    serde_json::to_writer_pretty(&mut *output, &plan)?;
    writeln!(output)?;
    Ok(())
}
