// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use config::FileFormat;

#[test]
fn test_defaults() {
    let settings: Settings = Settings::defaults()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.database.url, "sqlite://data/app.db?mode=rwc");
    assert_eq!(settings.database.max_connections, Some(5));
    assert!(!settings.scraper.use_browser);
    assert_eq!(settings.scraper.engine_config().timeout, Duration::from_secs(30));
    assert_eq!(settings.scraper.image_timeout(), Duration::from_secs(15));
    assert_eq!(settings.note.base_url, "https://note.com/api/v2");
    assert_eq!(settings.note.api_token, None);
    assert!(settings.note.remote_enabled);
    assert_eq!(settings.export.dir, "exports");
    assert!(!settings.metrics.enabled);
}

#[test]
fn test_file_overrides_defaults() {
    let toml = r#"
        [scraper]
        use_browser = true

        [note]
        api_token = "secret"
        remote_enabled = false
    "#;

    let settings: Settings = Settings::defaults()
        .unwrap()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert!(settings.scraper.use_browser);
    assert_eq!(settings.note.api_token.as_deref(), Some("secret"));
    assert!(!settings.note.remote_enabled);
    assert_eq!(settings.server.host, "0.0.0.0");
}
