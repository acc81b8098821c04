use chrono;
use env_logger;
use errors::*;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Installs the global logger: timestamped lines on stderr, filtered by
/// `RUST_LOG` (warnings only when unset).
pub fn init_logger() -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let t = chrono::Utc::now();
        writeln!(
            buf,
            "{} {}:{}: {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.module_path().unwrap_or("?"),
            record.args()
        )
    });

    match env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Warn);
        }
    }

    builder.try_init()?;
    Ok(())
}
