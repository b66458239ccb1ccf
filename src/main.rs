use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vanity_render::config::{self, Config, DEFAULT_NUM_WORKERS};
use vanity_render::git::GitModuleFinder;
use vanity_render::site::hydrators::{FragmentHydrator, GitHubHydrator, MetadataHydrator};
use vanity_render::site::renderers::MetadataRenderer;
use vanity_render::site::{Renderer, Site, hydrate};

#[derive(Parser)]
#[command(name = "vanity-render")]
#[command(version, about = "Resolves Go vanity import paths and their latest versions")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "build")]
    out: PathBuf,

    /// Rebuild only the listed modules, comma separated
    #[arg(long, value_delimiter = ',')]
    modules: Vec<String>,

    /// Number of repositories resolved concurrently
    #[arg(long, default_value_t = DEFAULT_NUM_WORKERS)]
    workers: usize,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = vanity_render::logging::init(cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("could not initialize logging: {}", e))?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let checksum = config::checksum(&cli.config)?;
    let config = Config::from_file(&cli.config)?;
    let supported_host = config.supported_host.clone();

    let modules: Vec<String> = cli
        .modules
        .into_iter()
        .map(|module| module.trim().to_string())
        .filter(|module| !module.is_empty())
        .collect();

    let github = GitHubHydrator::new(Arc::new(GitModuleFinder::new()))
        .with_workers(cli.workers)
        .with_supported_host(supported_host);
    let hydrator = FragmentHydrator::new(MetadataHydrator::new(checksum.as_str()), github, modules);

    let mut site = Site::from(config);
    hydrate(&mut site, &[&hydrator]).await?;

    prepare_output_dir(&cli.out)?;
    MetadataRenderer::new(&cli.out, checksum).render(&site)?;

    info!(
        "Resolved {} repositories into {}",
        site.repositories.len(),
        cli.out.display()
    );

    Ok(())
}

fn prepare_output_dir(path: &Path) -> anyhow::Result<()> {
    if path.exists() && !path.is_dir() {
        anyhow::bail!("output path {} is not a directory", path.display());
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("could not create output directory {}", path.display()))
}
