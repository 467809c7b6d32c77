use clap::Parser;
use devportal_dashboard::core::{ConfigProvider, Storage};
use devportal_dashboard::utils::{logger, validation::Validate};
use devportal_dashboard::{
    CliConfig, Dashboard, DashboardSettings, HttpFetcher, LocalStorage, LogFormat, Page,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let settings = DashboardSettings::from_cli(&cli)?;

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let fetcher = HttpFetcher::from_config(&settings)?;
    let dashboard = Dashboard::new(fetcher);
    let mut page = Page::new(settings.page_title());

    tracing::info!("Loading dashboard from {}{}", settings.base_url(), settings.api_prefix());
    dashboard.load(&mut page).await;

    let storage = LocalStorage::new(".");
    storage
        .write_file(settings.output_path(), page.to_document().as_bytes())
        .await?;

    if page.failed() {
        eprintln!("❌ {}", page.region_text(devportal_dashboard::RegionId::Products));
        eprintln!("📁 Page written to: {}", settings.output_path());
        std::process::exit(2);
    }

    println!("✅ Dashboard loaded");
    println!("📁 Page written to: {}", settings.output_path());
    Ok(())
}
