//! Logging setup for the generator binary

use std::fmt::Display;
use std::io::{self, Write};

/// Initialize the logger for terminal use.
/// Uses INFO level unless RUST_LOG says otherwise. Each record starts with a
/// carriage return so it lines up while the keyboard source holds raw mode.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            write_record(buf, &timestamp, record)
        })
        .init();
}

fn write_record(out: &mut dyn Write, timestamp: &dyn Display, record: &log::Record) -> io::Result<()> {
    writeln!(
        out,
        "\r[{} {:5} {}] {}",
        timestamp,
        record.level(),
        record.module_path().unwrap_or("unknown"),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_has_single_line_ending() {
        let mut out = Vec::new();
        write_record(
            &mut out,
            &"12:00:00",
            &log::Record::builder()
                .args(format_args!("Invalid steps value 0. Using 100."))
                .level(log::Level::Warn)
                .module_path(Some("wavegen::cli"))
                .build(),
        )
        .unwrap();

        let line = String::from_utf8(out).unwrap();
        assert_eq!(line, "\r[12:00:00 WARN  wavegen::cli] Invalid steps value 0. Using 100.\n");
        assert_eq!(line.matches('\r').count(), 1);
    }
}
