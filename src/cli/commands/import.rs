use crate::cli::commands::log_op;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportOutcome, read_csv_rows};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use crate::utils::path::expand_tilde;

fn print_outcome(o: &ImportOutcome) {
    info(format!("Inserted: {}", o.inserted));
    info(format!("Updated:  {}", o.updated));
    info(format!("Skipped:  {}", o.skipped));
    if o.rejected > 0 {
        warning(format!("Rejected (invalid date): {}", o.rejected));
    }
    if o.malformed > 0 {
        warning(format!("Malformed rows dropped: {}", o.malformed));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, overwrite } = cmd {
        let path = expand_tilde(file);
        if !path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("CSV file not found: {}", path.display()),
            )));
        }

        let rows = read_csv_rows(&path)?;
        let mut pool = DbPool::open(cfg)?;

        match ImportLogic::import_batch(&mut pool, &rows, *overwrite) {
            Ok(outcome) => {
                print_outcome(&outcome);
                log_op(
                    &pool.conn,
                    "import",
                    &path.to_string_lossy(),
                    &outcome.to_string(),
                );
                success("Import completed.");
            }
            Err(AppError::ImportAborted { outcome, source }) => {
                // partial commits stay; still report what got in
                error("Import aborted; rows before the failure were kept.");
                print_outcome(&outcome);
                log_op(
                    &pool.conn,
                    "import",
                    &path.to_string_lossy(),
                    &format!("aborted after {}: {}", outcome, source),
                );
                return Err(AppError::ImportAborted { outcome, source });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
