use clap::Parser;
use patriot_forms::config::Command;
use patriot_forms::domain::ports::{RemoteStore, StoreSettings};
use patriot_forms::forms::{FormField, FormModel, FormState, Phase};
use patriot_forms::utils::error::{ErrorSeverity, FormsError};
use patriot_forms::utils::{logger, validation::Validate};
use patriot_forms::{CliConfig, EnvConfig, FormsApp, MemoryStore, RestStore, TomlConfig};
use std::sync::Arc;

fn load_settings(config: &CliConfig) -> Result<Box<dyn StoreSettings>, FormsError> {
    if let Some(path) = &config.config {
        let toml_config = TomlConfig::from_file(path)?;
        if !config.dry_run {
            toml_config.validate()?;
        }
        return Ok(Box::new(toml_config));
    }

    match EnvConfig::from_env() {
        Ok(env_config) => {
            if !config.dry_run {
                env_config.validate()?;
            }
            Ok(Box::new(env_config))
        }
        Err(_) if config.dry_run => Ok(Box::new(EnvConfig::offline())),
        Err(e) => Err(e),
    }
}

/// 印出表單結果；成功回傳 true
fn report_form<D: FormModel>(state: &FormState<D>, success_message: &str) -> bool {
    if state.phase() == Phase::Success {
        println!("✅ {}", success_message);
        return true;
    }

    for (field, message) in state.errors().iter() {
        if field == FormField::Submit {
            eprintln!("❌ {}", message);
        } else {
            eprintln!("❌ {}: {}", field, message);
        }
    }
    false
}

async fn run(config: CliConfig) -> Result<bool, FormsError> {
    let settings = load_settings(&config)?;

    let store: Arc<dyn RemoteStore> = if config.dry_run {
        tracing::info!("🧪 Dry run: using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(RestStore::new(&*settings)?)
    };
    let app = FormsApp::new(store, &*settings);

    match &config.command {
        Command::Enroll { .. } => {
            let input = config.command.ambassador_data().unwrap_or_default();
            let state = app.enroll(input).await;
            Ok(report_form(&state, "Thank you for becoming an ambassador!"))
        }
        Command::Business { place_id, .. } => {
            let edits = config.command.business_edits();
            let state = app.register_business(place_id.clone(), edits).await?;
            Ok(report_form(&state, "Business information saved."))
        }
        Command::Lookup { place_id } => {
            match app.lookup(place_id).await? {
                Some(business) => println!("{}", serde_json::to_string_pretty(&business)?),
                None => println!("No business found for place id {}", place_id),
            }
            Ok(true)
        }
        Command::Claim {
            business_id,
            user_id,
        } => {
            let business = app.claim(business_id, user_id).await?;
            println!(
                "✅ {} is now claimed by {}",
                business.business_name, user_id
            );
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting patriot-forms CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(config).await {
        Ok(true) => {}
        // 表單欄位錯誤已印出
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
