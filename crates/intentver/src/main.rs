use clap::Parser;
use colored::Colorize;
use intentver::ResolverConfig;
use proc_exit::{Code, ExitResult};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    logging: clap_verbosity_flag::Verbosity,
    /// Path within the repository to resolve
    #[arg(short, long, default_value = ".")]
    repo: String,
    /// Revision to resolve
    #[arg(long, default_value = "HEAD")]
    basis_commit: String,
    /// PR number to surface as `pr<N>` build metadata
    #[arg(long)]
    pr_number: Option<i64>,
    /// Branch name to use in metadata, bypassing Git detection
    #[arg(long)]
    branch: Option<String>,
    /// SHA abbreviation length, between 7 and 40
    #[arg(long, default_value_t = 12)]
    sha_length: usize,
    /// Emit the extended rendering (including build metadata)
    #[arg(short, long)]
    extended: bool,
}

fn main() {
    let result = run();
    proc_exit::exit(result);
}

fn run() -> ExitResult {
    let args = Cli::parse();

    let mut builder = get_logging(args.logging.log_level_filter());
    builder.init();

    log::info!("resolving version for `{}` at `{}`", args.repo, args.basis_commit);

    let mut config = ResolverConfig::new(&args.repo)
        .set_basis_commit(&args.basis_commit)
        .set_sha_length(args.sha_length)
        .set_verbose(args.logging.log_level_filter() >= log::LevelFilter::Trace);

    if let Some(pr_number) = args.pr_number {
        config = config.set_pr_number(pr_number);
    }
    if let Some(branch) = args.branch {
        config = config.set_branch_override(branch);
    }

    let version = config.resolve()?;
    let rendered = if args.extended {
        version.render_extended()
    } else {
        version.render_standard()
    };

    if args.logging.log_level_filter() >= log::LevelFilter::Info {
        let route = if version.is_final() { "concrete".green() } else { "development".yellow() };
        log::info!("resolved via {route} mode");
    }

    println!("{rendered}");

    Code::SUCCESS.ok()
}

fn get_logging(level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, level);
    builder.format_timestamp_secs().format_module_path(false);

    builder
}
