use tessera_domain::config::ApiConfig;

#[test]
fn defaults_are_sane() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.server.port, 4710);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "tessera");
    assert_eq!(cfg.database.database, "cms");
    assert_eq!(cfg.media.base_url, "/media");
}

#[test]
fn deserializes_partial_overrides() {
    let cfg: ApiConfig = serde_json::from_str(
        r#"{ "server": { "port": 8088 }, "database": { "url": "ws://localhost:8000" } }"#,
    )
    .expect("partial config");
    assert_eq!(cfg.server.port, 8088);
    assert_eq!(cfg.database.url, "ws://localhost:8000");
    // Untouched sections keep their defaults.
    assert_eq!(cfg.database.namespace, "tessera");
}
