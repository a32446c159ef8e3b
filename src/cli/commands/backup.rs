use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let db_path = expand_tilde(&cfg.database);
        BackupLogic::backup(&db_path.to_string_lossy(), &expand_tilde(file), *compress)?;
    }

    Ok(())
}
