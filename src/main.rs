use std::sync::Arc;

use ipdb::cli::{CliParser, Command, print_help};
use ipdb::config;
use ipdb::loader::RangeLoader;
use ipdb::storage::StorageFactory;
use ipdb::runtime;
use ipdb::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::init_config();

    // guard 必须存活到进程结束，否则非阻塞日志会丢失
    let _log_guard = init_logging(config::get_config());

    let command = match CliParser::new().parse() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            std::process::exit(2);
        }
    };

    match command {
        Command::Serve => runtime::modes::run_server().await,
        Command::Load { input, batch_size } => run_load(input, batch_size).await,
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

/// 一次性批量装载，运行到结束或被外部终止
async fn run_load(input: Option<String>, batch_size: Option<usize>) -> anyhow::Result<()> {
    let config = config::get_config();
    let input = input.unwrap_or_else(|| config.load.input_path.clone());
    let batch_size = batch_size.unwrap_or(config.load.batch_size);

    let storage = StorageFactory::create().await.map_err(|e| {
        eprintln!("{}", e.format_colored());
        anyhow::anyhow!(e.format_simple())
    })?;

    let loader = RangeLoader::new(Arc::clone(&storage), batch_size);
    let report = loader.load_file(&input).await.map_err(|e| {
        eprintln!("{}", e.format_colored());
        anyhow::anyhow!(e.format_simple())
    })?;

    println!(
        "Load complete: {} records committed, {} skipped",
        report.committed, report.skipped
    );
    Ok(())
}
