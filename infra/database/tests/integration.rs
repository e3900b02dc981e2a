use tessera_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_create_content_schema() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "schema_db")
        .init()
        .await
        .expect("connect to mem://");

    // Unique slug index must reject a duplicate.
    db.query("CREATE content_item SET slug = 'about', title = 'About'")
        .await
        .expect("first insert")
        .check()
        .expect("first insert succeeds");

    let dup = db
        .query("CREATE content_item SET slug = 'about', title = 'About again'")
        .await
        .expect("query runs")
        .check();
    assert!(dup.is_err(), "duplicate slug should violate the unique index");
}

#[tokio::test]
async fn migrations_are_idempotent_per_session() {
    // Connecting twice to the same engine would replay migrations; mem:// is
    // per-connection, so instead assert the tracking table records each script once.
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "tracking_db")
        .init()
        .await
        .expect("connect to mem://");

    let mut response = db
        .query("SELECT VALUE version FROM migration ORDER BY version")
        .await
        .expect("query runs");
    let versions = response.take::<Vec<String>>(0).expect("versions parse");
    assert_eq!(versions, vec!["0001", "0002", "0003"]);
}
