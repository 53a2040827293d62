use anyhow::Result;
use clap::Parser;
use log::error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use transient_package::commands::{self, ConfigOverrides, TransientRequest};
use transient_package::wheel::DEFAULT_TAG;

/// transient-package - replace Python packages with dependency shims
///
/// A transient package is an empty wheel named after a "source" package whose
/// only content is a dependency on a "target" package. Installing it in place
/// of the source makes everything that requires the source get the target.
///
/// Examples:
///   transient-package create -s foo -t bar -o dist/
///   transient-package install -s foo -t bar --target-version '>=2,<3'
///   transient-package uninstall foo
#[derive(Parser, Debug)]
#[command(author, version = env!("TRANSIENT_PACKAGE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a transient package.
    ///
    /// If the source version is not given it defaults to "0.0.0". If the
    /// target version is not given the dependency is unconstrained.
    Create(CreateArgs),

    /// Generate and install a transient package in place of the source.
    ///
    /// The installed source package is detected and uninstalled first. Its
    /// version is reused for the transient package, and when no target
    /// version is given the target is limited to the same minor line.
    Install(InstallArgs),

    /// Uninstall a transient package. Regular packages are left alone.
    Uninstall(UninstallArgs),
}

/// Options describing the transient package, shared by create and install
#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Name of the transient package to be created
    #[arg(short = 's', long = "source", value_name = "NAME")]
    pub source: String,

    /// Version of the transient package to be created
    #[arg(long = "source-version", value_name = "VERSION")]
    pub source_version: Option<String>,

    /// Name of the target package that the transient package will depend on
    #[arg(short = 't', long = "target", value_name = "NAME")]
    pub target: String,

    /// Version or specifier of the target package (e.g. "2.0.0", ">=2,<3")
    #[arg(long = "target-version", value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Wheel compatibility tag
    #[arg(long = "tag", value_name = "TAG", default_value = DEFAULT_TAG)]
    pub tag: String,
}

impl From<PackageArgs> for TransientRequest {
    fn from(args: PackageArgs) -> Self {
        TransientRequest {
            source: args.source,
            source_version: args.source_version,
            target: args.target,
            target_version: args.target_version,
            tag: args.tag,
        }
    }
}

/// Options selecting the Python environment, shared by install and uninstall
#[derive(clap::Args, Debug)]
pub struct EnvironmentArgs {
    /// Python interpreter of the target environment
    #[arg(
        short = 'i',
        long = "interpreter",
        env = "TRANSIENT_PACKAGE_PYTHON",
        value_name = "PATH"
    )]
    pub interpreter: Option<PathBuf>,

    /// Read installed metadata from this site-packages directory instead of
    /// asking the interpreter (repeatable)
    #[arg(long = "site-packages", value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,
}

impl From<EnvironmentArgs> for ConfigOverrides {
    fn from(args: EnvironmentArgs) -> Self {
        ConfigOverrides {
            // An empty TRANSIENT_PACKAGE_PYTHON means unset
            interpreter: args.interpreter.filter(|path| !path.as_os_str().is_empty()),
            site_packages: args.site_packages,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Directory where the wheel file will be saved
    #[arg(short = 'o', long = "output-directory", value_name = "DIR")]
    pub output_directory: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub environment: EnvironmentArgs,
}

#[derive(clap::Args, Debug)]
pub struct UninstallArgs {
    /// Name of the transient package to uninstall
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    #[command(flatten)]
    pub environment: EnvironmentArgs,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}  {}",
                record.level(),
                buf.timestamp(),
                record.args()
            )
        })
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let runtime = transient_package::runtime::RealRuntime;

    match cli.command {
        Commands::Create(args) => {
            let request = TransientRequest::from(args.package);
            commands::create(&runtime, &request, &args.output_directory)?;
        }
        Commands::Install(args) => {
            commands::install(runtime, args.package.into(), args.environment.into())?
        }
        Commands::Uninstall(args) => {
            commands::uninstall(runtime, &args.package, args.environment.into())?
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
