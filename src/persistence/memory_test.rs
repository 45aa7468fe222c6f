use super::*;

fn record(name: &str) -> ProjectRecord {
    ProjectRecord {
        name: name.into(),
        status: "Draft".into(),
        room: "{}".into(),
        camera: "{}".into(),
        furniture: "[]".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_assigns_identity_and_timestamps() {
    let repo = MemoryRepository::new();
    let created = repo.create_project(record("Den")).await.unwrap();
    let id = created.id.clone().unwrap();
    assert!(created.created_at.is_some());
    assert_eq!(repo.project(&id), Some(created));
    assert_eq!(repo.calls().create_project, 1);
}

#[tokio::test]
async fn create_ignores_caller_identity() {
    let repo = MemoryRepository::new();
    let mut fields = record("Den");
    fields.id = Some("forced".into());
    let created = repo.create_project(fields).await.unwrap();
    assert_ne!(created.id.as_deref(), Some("forced"));
}

#[tokio::test]
async fn update_overwrites_fields_keeps_created_at() {
    let repo = MemoryRepository::new();
    let created = repo.create_project(record("Den")).await.unwrap();
    let id = created.id.clone().unwrap();

    let updated = repo.update_project(&id, record("Den v2")).await.unwrap();
    assert_eq!(updated.name, "Den v2");
    assert_eq!(updated.id.as_deref(), Some(id.as_str()));
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(repo.project_count(), 1);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let repo = MemoryRepository::new();
    let err = repo.update_project("missing", record("x")).await.unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn get_and_delete() {
    let repo = MemoryRepository::new();
    let id = repo.seed_project(record("Porch"));
    assert_eq!(repo.get_project(&id).await.unwrap().name, "Porch");
    repo.delete_project(&id).await.unwrap();
    assert!(matches!(repo.get_project(&id).await, Err(PersistenceError::NotFound(_))));
    assert!(matches!(repo.delete_project(&id).await, Err(PersistenceError::NotFound(_))));
    let calls = repo.calls();
    assert_eq!(calls.get_project, 2);
    assert_eq!(calls.delete_project, 2);
}

#[tokio::test]
async fn seed_keeps_given_id() {
    let repo = MemoryRepository::new();
    let mut rec = record("Attic");
    rec.id = Some("attic-1".into());
    assert_eq!(repo.seed_project(rec), "attic-1");
    assert_eq!(repo.calls(), CallCounts::default());
}

#[tokio::test]
async fn products_are_served() {
    let repo = MemoryRepository::with_products(vec![Product { id: "p1".into(), name: "Bench".into(), ..Default::default() }]);
    let products = repo.get_all_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Bench");
}

#[tokio::test]
async fn unavailable_fails_every_call_but_counts_it() {
    let repo = MemoryRepository::new();
    let id = repo.seed_project(record("Loft"));
    repo.set_unavailable(true);
    assert!(matches!(repo.get_project(&id).await, Err(PersistenceError::Unavailable(_))));
    assert!(matches!(repo.create_project(record("x")).await, Err(PersistenceError::Unavailable(_))));
    assert!(matches!(repo.get_all_products().await, Err(PersistenceError::Unavailable(_))));
    assert_eq!(repo.project_count(), 1);
    assert_eq!(repo.calls().create_project, 1);

    repo.set_unavailable(false);
    assert!(repo.get_project(&id).await.is_ok());
}
