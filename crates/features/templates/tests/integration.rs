use tessera_database::Database;
use tessera_templates::{TemplateError, TemplateRegistry, builtin_templates};

async fn test_db(name: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", name)
        .init()
        .await
        .expect("connect to mem://")
}

#[tokio::test]
async fn seeding_and_lookup() {
    let db = test_db("templates_lookup").await;
    let registry = TemplateRegistry::new(db);
    registry.ensure_registered(&builtin_templates()).await.expect("seed builtins");

    let template = registry.get("landing").await.expect("landing exists");
    assert_eq!(template.name, "Landing Page");
    assert!(template.zone("hero").is_some_and(|z| z.required));
    assert!(template.zone("nope").is_none());
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let db = test_db("templates_missing").await;
    let registry = TemplateRegistry::new(db);
    registry.ensure_registered(&builtin_templates()).await.expect("seed builtins");

    let err = registry.get("no-such-template").await.unwrap_err();
    assert!(matches!(err, TemplateError::NotFound { .. }));
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let db = test_db("templates_idempotent").await;
    let registry = TemplateRegistry::new(db);
    registry.ensure_registered(&builtin_templates()).await.expect("first seed");
    registry.ensure_registered(&builtin_templates()).await.expect("second seed");

    let all = registry.list(false).await.expect("list");
    assert_eq!(all.len(), builtin_templates().len());

    // Ordered by sort_order.
    let identifiers: Vec<_> = all.iter().map(|t| t.identifier.as_str()).collect();
    assert_eq!(identifiers, ["landing", "article", "contact"]);
}

#[tokio::test]
async fn list_can_filter_inactive() {
    let db = test_db("templates_active").await;
    let registry = TemplateRegistry::new(db);

    let mut templates = builtin_templates();
    templates[2].active = false;
    registry.ensure_registered(&templates).await.expect("seed");

    let active = registry.list(true).await.expect("list active");
    assert_eq!(active.len(), templates.len() - 1);
    assert!(active.iter().all(|t| t.active));
}
