use anyhow::Context;
use clap::Parser;
use site_fx::config::Command;
use site_fx::core::contact::{AlertCenter, ContactDesk};
use site_fx::core::script::{self, VisitScript};
use site_fx::domain::model::ContactForm;
use site_fx::domain::ports::Scheduler;
use site_fx::utils::error::ErrorSeverity;
use site_fx::utils::{logger, validation::Validate};
use site_fx::{
    CliConfig, ManualScheduler, PageSession, SimulatedSubmitter, SiteConfig, SiteError,
    TokioScheduler,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting site-fx");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate() {
        fail(e);
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            SiteConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => SiteConfig::default(),
    };
    if let Err(e) = config.validate() {
        fail(e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    let outcome = match cli.command {
        Command::Simulate {
            script,
            duration_ms,
            realtime,
            json,
        } => simulate(config, script, Duration::from_millis(duration_ms), realtime, json).await,
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                message,
            };
            contact(config, form).await
        }
    };

    if let Err(e) = outcome {
        fail(e);
    }

    Ok(())
}

async fn simulate(
    config: SiteConfig,
    script_path: Option<String>,
    duration: Duration,
    realtime: bool,
    json: bool,
) -> site_fx::Result<()> {
    let visit = match script_path {
        Some(path) => VisitScript::from_json_file(&path)?,
        None => VisitScript::travel_demo(),
    };
    visit.validate()?;

    tracing::info!(
        "🎬 Replaying {} events over {:?} ({})",
        visit.events.len(),
        duration,
        if realtime { "real time" } else { "virtual clock" }
    );

    let VisitScript {
        viewport_height,
        reviews,
        reveal_targets,
        events,
    } = visit;

    let report = if realtime {
        let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::try_current()?);
        let mut session = PageSession::new(
            config,
            scheduler,
            reviews,
            reveal_targets,
            SimulatedSubmitter::new(),
            viewport_height,
        )?;
        let dispatched = script::replay_realtime(&mut session, &events, duration).await?;
        tracing::info!("📊 Dispatched {} events", dispatched);
        session.report()
    } else {
        let clock = ManualScheduler::new();
        let mut session = PageSession::new(
            config,
            Arc::new(clock.clone()),
            reviews,
            reveal_targets,
            SimulatedSubmitter::new(),
            viewport_height,
        )?;
        let dispatched = script::replay_on_clock(&mut session, &clock, &events, duration).await?;
        tracing::info!("📊 Dispatched {} events, virtual time now {:?}", dispatched, clock.now());
        session.report()
    };

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{}", rendered);
    } else {
        println!("⭐ Review showing: {}/{}", report.review_index + 1, report.review_count);
        println!("📱 Mobile menu open: {}", report.nav_open);
        println!("🧭 Navbar scrolled: {}", report.navbar_scrolled);
        println!("🏞️  Hero offset: {:.1}px", report.hero_translate_y);
        println!(
            "🖼️  Lightbox: {}",
            report.lightbox_src.as_deref().unwrap_or("closed")
        );
        match &report.alert {
            Some(alert) => println!("🔔 Alert ({:?}): {}", alert.kind, alert.message),
            None => println!("🔔 Alert: none"),
        }
        println!("✨ Revealed: {}", report.revealed.join(", "));
        println!("🖼️  Lazy images loaded: {}", report.loaded_images.join(", "));
        println!(
            "💬 Chat button: scale {:.1}, rotate {:.0}°",
            report.float_button.scale, report.float_button.rotate_deg
        );
    }

    Ok(())
}

async fn contact(config: SiteConfig, mut form: ContactForm) -> site_fx::Result<()> {
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::try_current()?);
    let alerts = AlertCenter::new(scheduler, config.alert_dismiss_after());
    let desk = ContactDesk::new(config.contact.clone(), SimulatedSubmitter::new(), alerts);

    let alert = desk.submit(&mut form).await?;
    println!("✅ {}", alert.message);
    Ok(())
}

fn fail(e: SiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
