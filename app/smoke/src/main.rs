use anchor_client::solana_sdk::pubkey::Pubkey;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use multicontract_fib::{
    fib::{fibonacci, MAX_INPUT},
    Half,
};
use tracing::{debug, info};
use workspace_client::{fib, provider::PROVIDER_URL_VAR, Provider, ProviderConfig, Workspace};

mod logging;

/// Smoke-tests the workspace programs against a running cluster.
#[derive(Debug, Parser)]
#[command(name = "anchor-smoke", version)]
struct Cli {
    /// Which `[programs.<cluster>]` table of Anchor.toml to resolve names from.
    #[arg(long, env = "ANCHOR_CLUSTER", default_value = "localnet")]
    cluster: String,

    /// Top the payer up to this many SOL before sending (localnet and devnet only).
    #[arg(long)]
    airdrop: Option<u32>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Call `initialize` on a program that takes no accounts.
    Initialize {
        /// Program name as declared in Anchor.toml, e.g. `hello_world` or `HelloWorld`.
        program: String,
    },
    /// List the programs registered for the cluster.
    Programs,
    /// Drive the two-half Fibonacci program.
    #[command(subcommand)]
    Fib(FibCommand),
}

#[derive(Debug, Subcommand)]
enum FibCommand {
    /// Create both halves of the calculator.
    Init,
    /// Compute F(n) starting from one half.
    Calc {
        n: u64,
        #[arg(long, value_enum, default_value_t = Entry::Left)]
        entry: Entry,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Entry {
    Left,
    Right,
}

impl From<Entry> for Half {
    fn from(value: Entry) -> Self {
        match value {
            Entry::Left => Half::Left,
            Entry::Right => Half::Right,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.json_logs);

    let cwd = std::env::current_dir()?;
    let workspace = Workspace::discover(&cwd, &cli.cluster).context("couldn't load workspace")?;

    match cli.command {
        Command::Programs => {
            for (name, id) in workspace.programs() {
                println!("{name} {id}");
            }
        }
        Command::Initialize { program } => {
            let id = no_account_program(&workspace, &program)?;
            let provider = connect(&workspace, cli.airdrop).await?;
            let program = provider.program(id)?;
            let sig = workspace_client::initialize(&program).await?;
            println!("Your transaction signature {sig}");
        }
        Command::Fib(command) => {
            let provider = connect(&workspace, cli.airdrop).await?;
            let program = provider.program(multicontract_fib::ID)?;
            match command {
                FibCommand::Init => {
                    let sig = fib::initialize(&program, provider.payer()).await?;
                    println!("Your transaction signature {sig}");
                }
                FibCommand::Calc { n, entry } => {
                    let value = expected_value(n)?;
                    let sig = fib::calculate(&program, n, entry.into()).await?;
                    let (left, right) = fib::halves(&program).await?;
                    info!(?left, ?right, "halves after calculation");
                    println!("Your transaction signature {sig}");
                    println!("F({n}) = {value}");
                }
            }
        }
    }

    Ok(())
}

/// Resolves a program whose `initialize` takes no accounts.
fn no_account_program(workspace: &Workspace, name: &str) -> anyhow::Result<Pubkey> {
    let id = workspace.program_id(name)?;
    if id == multicontract_fib::ID {
        bail!("{name} needs its two halves passed to initialize, use `anchor-smoke fib init`");
    }
    Ok(id)
}

/// F(n) as the program computes it, so the printed value doesn't depend on
/// whatever last wrote to the halves.
fn expected_value(n: u64) -> anyhow::Result<u64> {
    fibonacci(n).with_context(|| {
        format!("F({n}) does not fit in u64, the largest supported input is {MAX_INPUT}")
    })
}

/// Provider from the environment, falling back to the manifest's `[provider] cluster` url.
async fn connect(workspace: &Workspace, airdrop: Option<u32>) -> anyhow::Result<Provider> {
    let fallback_url = workspace.cluster_url()?;
    let config = ProviderConfig::from_lookup(|key| match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) if key == PROVIDER_URL_VAR => fallback_url.clone(),
        Err(_) => None,
    })
    .context("couldn't configure provider")?;
    let provider = Provider::new(config)?;

    if let Some(sol) = airdrop {
        let balance = provider.airdrop_up_to(sol).await?;
        debug!(%balance, "payer funded");
    }
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    const MANIFEST: &str = r#"
[programs.localnet]
hello_world = "FnTmCmzADAeEcc1gy9RtfTqw8HcP1hbpyGY5E6PZiiKW"
multicontract_fib = "7PfPmPrui2UqZBQa421xgN85MdUnq5D8Kt43qdDXE8zz"
"#;

    #[test]
    fn initialize_refuses_programs_with_accounts() {
        let workspace = Workspace::from_toml_str(MANIFEST, "localnet").unwrap();

        assert_eq!(
            no_account_program(&workspace, "HelloWorld").unwrap(),
            hello_world_id()
        );
        let err = no_account_program(&workspace, "multicontract_fib").unwrap_err();
        assert!(err.to_string().contains("fib init"), "{err}");
    }

    fn hello_world_id() -> Pubkey {
        "FnTmCmzADAeEcc1gy9RtfTqw8HcP1hbpyGY5E6PZiiKW".parse().unwrap()
    }

    #[test]
    fn printed_value_is_computed_locally() {
        assert_eq!(expected_value(10).unwrap(), 55);
        assert_eq!(expected_value(MAX_INPUT).unwrap(), 12_200_160_415_121_876_738);
        assert!(expected_value(MAX_INPUT + 1).is_err());
    }

    #[test]
    fn parses_fib_entry() {
        let cli = Cli::try_parse_from(["anchor-smoke", "fib", "calc", "10", "--entry", "right"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Fib(FibCommand::Calc {
                n: 10,
                entry: Entry::Right
            })
        ));
    }
}
