use evhub_domain::config::LoggingConfig;
use evhub_logger::Logger;
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn json_file_logging_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config = LoggingConfig {
        level: "debug".into(),
        json: true,
        directory: Some(log_dir.clone()),
        env_filter: None,
    };

    let logger = Logger::builder("evhub-file").console(false).config(&config)?.init()?;
    assert!(logger.writes_files());

    tracing::info!(plan = "Starter", "resolved plan");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().find(|l| l.contains("resolved plan")).expect("log line");
    assert!(line.starts_with('{'), "file layer should write JSON lines: {line}");
    assert!(line.contains("\"plan\":\"Starter\""));
    Ok(())
}
