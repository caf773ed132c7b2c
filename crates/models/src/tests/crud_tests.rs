use super::{setup_test_db, unique_email};
use crate::{catalog, errors::ModelError, order, order_deletion_log, order_details, user, user_credentials};
use sea_orm::{EntityTrait, QueryFilter, ColumnTrait, PaginatorTrait};
use anyhow::Result;
use uuid::Uuid;

/// Test user create and lookup by email
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let email = unique_email("crud");
    let created = user::create(&db, &email, "Crud User", user::DEFAULT_ROLE).await?;
    assert_eq!(created.email, email);
    assert_eq!(created.role, "user");

    let found = user::find_by_email(&db, &email).await?.expect("user by email");
    assert_eq!(found.id, created.id);

    // Unique index on email
    let dup = user::create(&db, &email, "Someone Else", user::DEFAULT_ROLE).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));

    let invalid = user::create(&db, "not-an-email", "X", user::DEFAULT_ROLE).await;
    assert!(matches!(invalid, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_email_case_is_ignored() -> Result<()> {
    let db = setup_test_db().await?;
    let email = unique_email("MiXeD");
    let created = user::create(&db, &email, "Mixed", user::DEFAULT_ROLE).await?;
    assert_eq!(created.email, email.to_lowercase());

    let found = user::find_by_email(&db, &email.to_uppercase()).await?.expect("user by any case");
    assert_eq!(found.id, created.id);

    let dup = user::create(&db, &email.to_lowercase(), "Twin", user::DEFAULT_ROLE).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert_keeps_one_row() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, &unique_email("cred"), "Cred", user::DEFAULT_ROLE).await?;

    user_credentials::upsert_password(&db, u.id, "hash-one".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-two".into(), "argon2").await?;
    assert_eq!(second.password_hash, "hash-two");

    let rows = user_credentials::Entity::find()
        .filter(user_credentials::Column::UserId.eq(u.id))
        .count(&db)
        .await?;
    assert_eq!(rows, 1);

    let empty = user_credentials::upsert_password(&db, u.id, " ".into(), "argon2").await;
    assert!(matches!(empty, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_catalog_is_seeded_and_sorted() -> Result<()> {
    let db = setup_test_db().await?;
    let services = catalog::list(&db).await?;
    assert!(services.len() >= migration::DEFAULT_CATALOG.len());
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let first = catalog::get(&db, services[0].id).await?;
    assert_eq!(first, services[0]);

    let missing = catalog::get(&db, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(ModelError::NotFound("service"))));
    Ok(())
}

#[tokio::test]
async fn test_history_joins_service_and_details() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, &unique_email("hist"), "Hist", user::DEFAULT_ROLE).await?;
    let services = catalog::list(&db).await?;
    let (a, b) = (&services[0], &services[1]);

    let with_note = order::create(&db, u.id, a.id).await?;
    order_details::create(&db, with_note.id, "ring the bell twice").await?;
    let without_note = order::create(&db, u.id, b.id).await?;

    let rows = order::history(&db, u.id, None).await?;
    assert_eq!(rows.len(), 2);
    let noted = rows.iter().find(|r| r.order_id == with_note.id).expect("noted row");
    assert_eq!(noted.service_name, a.name);
    assert_eq!(noted.price_cents, a.price_cents);
    assert_eq!(noted.extra_info.as_deref(), Some("ring the bell twice"));
    let plain = rows.iter().find(|r| r.order_id == without_note.id).expect("plain row");
    assert_eq!(plain.extra_info, None);

    let single = order::history(&db, u.id, Some(without_note.id)).await?;
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].service_id, b.id);
    Ok(())
}

#[tokio::test]
async fn test_history_is_scoped_to_user() -> Result<()> {
    let db = setup_test_db().await?;
    let alice = user::create(&db, &unique_email("alice"), "Alice", user::DEFAULT_ROLE).await?;
    let bob = user::create(&db, &unique_email("bob"), "Bob", user::DEFAULT_ROLE).await?;
    let svc = &catalog::list(&db).await?[0];

    let alice_order = order::create(&db, alice.id, svc.id).await?;
    assert!(order::history(&db, bob.id, None).await?.is_empty());
    assert!(order::find_owned(&db, bob.id, alice_order.id).await?.is_none());
    assert!(order::find_owned(&db, alice.id, alice_order.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_details_upsert_creates_then_overwrites() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, &unique_email("note"), "Note", user::DEFAULT_ROLE).await?;
    let svc = &catalog::list(&db).await?[0];
    let o = order::create(&db, u.id, svc.id).await?;

    assert!(order_details::find(&db, o.id).await?.is_none());
    order_details::upsert(&db, o.id, "first").await?;
    order_details::upsert(&db, o.id, "second").await?;
    let d = order_details::find(&db, o.id).await?.expect("details");
    assert_eq!(d.extra_info, "second");

    assert!(order_details::delete(&db, o.id).await?);
    assert!(!order_details::delete(&db, o.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_trigger_logs_each_deleted_order() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, &unique_email("trig"), "Trig", user::DEFAULT_ROLE).await?;
    let svc = &catalog::list(&db).await?[0];
    let o = order::create(&db, u.id, svc.id).await?;
    order_details::create(&db, o.id, "gate code 1234").await?;

    assert!(order_deletion_log::for_order(&db, o.id).await?.is_empty());
    assert!(order::delete(&db, o.id).await?);

    let log = order_deletion_log::for_order(&db, o.id).await?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].order_id, o.id);
    // FK cascade removes the note with its order
    assert!(order_details::find(&db, o.id).await?.is_none());

    // Deleting a missing order neither fails nor logs
    assert!(!order::delete(&db, o.id).await?);
    assert_eq!(order_deletion_log::for_order(&db, o.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_user_delete_cascades_orders() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, &unique_email("casc"), "Casc", user::DEFAULT_ROLE).await?;
    let svc = &catalog::list(&db).await?[0];
    let o = order::create(&db, u.id, svc.id).await?;

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(order::Entity::find_by_id(o.id).one(&db).await?.is_none());
    Ok(())
}
