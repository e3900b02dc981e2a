use serde_json::json;
use tessera_content::{ContentError, ContentStore, MediaStore, NewContent, NewMedia};
use tessera_database::Database;
use tessera_domain::content::ContentStatus;
use tessera_templates::{TemplateRegistry, builtin_templates};
use tessera_zones::ZoneValues;

async fn store(name: &str) -> ContentStore {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", name)
        .init()
        .await
        .expect("connect to mem://");
    let registry = TemplateRegistry::new(db.clone());
    registry.ensure_registered(&builtin_templates()).await.expect("seed builtins");
    ContentStore::new(db, registry)
}

fn new_article(slug: &str) -> NewContent {
    NewContent {
        title: "Hello".to_owned(),
        slug: slug.to_owned(),
        body: "<p>Body</p>".to_owned(),
        template: "article".to_owned(),
        parent_id: None,
        sort_order: 1,
    }
}

fn payload(entries: &[(&str, serde_json::Value)]) -> ZoneValues {
    entries.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
}

#[tokio::test]
async fn create_publish_fetch_roundtrip() {
    let store = store("content_roundtrip").await;

    let item = store.create(new_article("hello")).await.expect("create");
    assert_eq!(item.status, ContentStatus::Draft);
    assert!(item.published_at.is_none());

    let published = store.publish(&item.id).await.expect("publish");
    assert_eq!(published.status, ContentStatus::Published);
    assert!(published.published_at.is_some());

    let fetched = store.get_by_slug("hello").await.expect("fetch by slug");
    assert_eq!(fetched, published);
}

#[tokio::test]
async fn unknown_template_blocks_creation() {
    let store = store("content_bad_template").await;
    let mut new = new_article("orphan");
    new.template = "no-such-template".to_owned();

    let err = store.create(new).await.unwrap_err();
    assert!(matches!(err, ContentError::Template(_)));
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let store = store("content_dup_slug").await;
    store.create(new_article("taken")).await.expect("first create");

    let err = store.create(new_article("taken")).await.unwrap_err();
    assert!(matches!(err, ContentError::DuplicateSlug { .. }));
}

#[tokio::test]
async fn settings_reject_invalid_required_zones() {
    let store = store("content_settings_invalid").await;
    let item = store.create(new_article("invalid-zones")).await.expect("create");

    // "body" is a required rich_text zone on the article template.
    let bad = payload(&[("body", json!(42))]);
    let err = store.save_settings(&item.id, bad).await.unwrap_err();
    match err {
        ContentError::InvalidZones { violations } => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].key, "body");
        },
        other => panic!("expected InvalidZones, got {other}"),
    }
}

#[tokio::test]
async fn settings_roundtrip_and_render() {
    let store = store("content_render").await;
    let item = store.create(new_article("rendered")).await.expect("create");

    let values = payload(&[
        ("body", json!("<p>Article body</p>")),
        ("related", json!([{ "label": "Home", "url": "/" }])),
    ]);
    store.save_settings(&item.id, values).await.expect("save settings");

    let loaded = store.load_settings(&item.id).await.expect("load settings");
    assert_eq!(loaded.values.len(), 2);

    let fragments = store.render(&item.id).await.expect("render");
    assert_eq!(fragments["body"], "<p>Article body</p>");
    assert_eq!(fragments["related"], "<a href=\"/\">Home</a>");
    // Zones without saved values render as empty fragments.
    assert_eq!(fragments["attachments"], "");
    assert_eq!(fragments["teaser"], "");
}

#[tokio::test]
async fn delete_cascades_settings() {
    let store = store("content_delete").await;
    let item = store.create(new_article("doomed")).await.expect("create");
    store
        .save_settings(&item.id, payload(&[("body", json!("<p>x</p>"))]))
        .await
        .expect("save settings");

    store.delete(&item.id).await.expect("delete");

    let err = store.get(&item.id).await.unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));

    // Settings must be gone too; loading yields an empty payload.
    let settings = store.load_settings(&item.id).await.expect("load settings");
    assert!(settings.values.is_empty());
}

#[tokio::test]
async fn list_filters_by_status() {
    let store = store("content_list").await;
    let a = store.create(new_article("a")).await.expect("create a");
    store.create(new_article("b")).await.expect("create b");
    store.publish(&a.id).await.expect("publish a");

    let published = store.list(Some(ContentStatus::Published)).await.expect("list published");
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].slug, "a");

    let all = store.list(None).await.expect("list all");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn media_crud() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "media_crud")
        .init()
        .await
        .expect("connect to mem://");
    let media = MediaStore::new(db);

    let item = media
        .create(NewMedia {
            url: "/media/logo.png".to_owned(),
            name: "logo.png".to_owned(),
            mime: "image/png".to_owned(),
            alt: Some("Company logo".to_owned()),
        })
        .await
        .expect("create media");

    let fetched = media.get(&item.id).await.expect("get media");
    assert_eq!(fetched, item);

    assert_eq!(media.list(None).await.expect("list media").len(), 1);
    assert_eq!(media.list(Some("image/")).await.expect("list images").len(), 1);
    assert!(media.list(Some("video/")).await.expect("list videos").is_empty());

    media.delete(&item.id).await.expect("delete media");
    assert!(matches!(media.get(&item.id).await.unwrap_err(), ContentError::NotFound { .. }));
}
