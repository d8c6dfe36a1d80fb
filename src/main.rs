use anyhow::{Context, Result};
use featuredoc::{Config, HtmlFormatter, SiteBuilder};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.verbose);
    config.validate().context("Invalid configuration")?;

    let project_name = config
        .project_name()
        .context("Failed to determine project name")?;

    let tree = featuredoc::crawl(&config.features).context("Failed to read feature folder")?;

    let builder = SiteBuilder::from_config(&config, HtmlFormatter::new(project_name));
    let summary = builder
        .build(tree.as_ref())
        .context("Failed to generate documentation")?;

    println!(
        "Generated {} pages in {}",
        summary.pages_written,
        builder.output().display()
    );
    if summary.links_dangling > 0 {
        println!(
            "{} feature links could not be resolved",
            summary.links_dangling
        );
    }

    Ok(())
}
