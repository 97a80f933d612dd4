use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use console_core::{
    Authenticator, ConfiguredAuthenticator, Credentials, DashboardPage, HttpGateway, Notice, Page,
    ReportSheet, SvcPage, UserPage,
};
use tokio::sync::broadcast;
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides console.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Page to open after signing in.
    #[arg(long, value_enum, default_value = "dashboard")]
    page: PageArg,
    /// Search text applied to the management pages.
    #[arg(long)]
    search: Option<String>,
    /// Print the export sheet for the visible rows.
    #[arg(long)]
    export: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageArg {
    Dashboard,
    Users,
    Svcs,
}

impl From<PageArg> for Page {
    fn from(value: PageArg) -> Self {
        match value {
            PageArg::Dashboard => Page::Dashboard,
            PageArg::Users => Page::Users,
            PageArg::Svcs => Page::Svcs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let authenticator =
        ConfiguredAuthenticator::new(&settings.admin_email, &settings.admin_password);
    let session = authenticator
        .authenticate(&Credentials {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|err| anyhow!("{err}"))?;
    info!(email = %session.email, "signed in");

    let gateway = Arc::new(HttpGateway::new(settings.server_url));
    let page = Page::from(args.page);
    println!("== {} ==", page.title());
    match page {
        Page::Dashboard => run_dashboard(gateway).await,
        Page::Users => run_users(gateway, args.search, args.export).await,
        Page::Svcs => run_svcs(gateway, args.search, args.export).await,
    }

    Ok(())
}

async fn run_dashboard(gateway: Arc<HttpGateway>) {
    let mut dashboard = DashboardPage::new(gateway.clone(), gateway);
    let mut notices = dashboard.subscribe_notices();
    dashboard.reload().await;
    report_notices(&mut notices);

    let snapshot = dashboard.snapshot();
    println!("Total Users:   {}", snapshot.total_users);
    println!("Total SVCs:    {}", snapshot.total_svcs);
    println!("Active SVCs:   {}", snapshot.active_svcs);
    println!("Inactive SVCs: {}", snapshot.inactive_svcs);

    println!("\nUsers by station:");
    for group in &snapshot.users_by_station {
        println!("  {:<24} {}", group.name, group.count);
    }

    println!("\nSVCs by rank:");
    for group in &snapshot.svcs_by_rank {
        println!("  {:<28} {}", group.name, group.count);
    }

    println!("\nMonthly registrations:");
    for bucket in &snapshot.monthly_registrations {
        println!(
            "  {:<9} {} users, {} svcs",
            bucket.label, bucket.users, bucket.svcs
        );
    }
}

async fn run_users(gateway: Arc<HttpGateway>, search: Option<String>, export: bool) {
    let mut page = UserPage::new(gateway);
    let mut notices = page.subscribe_notices();
    page.refresh().await;
    if let Some(search) = search {
        page.set_search(search);
    }
    report_notices(&mut notices);

    for user in page.visible() {
        println!(
            "{:<24} {:<10} {:<24} {}",
            user.full_name.as_deref().unwrap_or("N/A"),
            user.officer_svc.as_deref().unwrap_or("N/A"),
            user.police_station.map(|s| s.label()).unwrap_or("N/A"),
            user.email.as_deref().unwrap_or("N/A"),
        );
    }

    if export {
        print_sheet(&page.export_sheet());
        report_notices(&mut notices);
    }
}

async fn run_svcs(gateway: Arc<HttpGateway>, search: Option<String>, export: bool) {
    let mut page = SvcPage::new(gateway);
    let mut notices = page.subscribe_notices();
    page.refresh().await;
    if let Some(search) = search {
        page.set_search(search);
    }
    report_notices(&mut notices);

    for svc in page.visible() {
        println!(
            "{:<10} {:<28} {:<24} {}",
            svc.officer_svc,
            svc.officer_rank.map(|r| r.label()).unwrap_or("N/A"),
            svc.police_station.map(|s| s.label()).unwrap_or("N/A"),
            if svc.is_active { "Active" } else { "Inactive" },
        );
    }

    if export {
        print_sheet(&page.export_sheet());
        report_notices(&mut notices);
    }
}

fn print_sheet(sheet: &ReportSheet) {
    println!("\n{}", sheet.title);
    println!("Generated on: {}", sheet.generated_at.format("%-m/%-d/%Y"));
    println!("Total Records: {}", sheet.total_records);
    println!("{}", sheet.columns.join(" | "));
    for row in &sheet.rows {
        println!("{}", row.join(" | "));
    }
}

fn report_notices(rx: &mut broadcast::Receiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        match notice {
            Notice::Success(text) => println!("[ok] {text}"),
            Notice::Warning(text) => println!("[warn] {text}"),
            Notice::Error(text) => eprintln!("[error] {text}"),
        }
    }
}
