use crate::db::connect;
use crate::{employee, employer, reaction, user, vacancy};
use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = connect().await.ok()?;
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}

async fn insert_user(db: &DatabaseConnection, role: &str) -> Result<user::Model> {
    let now = Utc::now().into();
    let am = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(format!("user_{}", Uuid::new_v4())),
        chat_id: Set(Uuid::new_v4().simple().to_string()),
        is_active: Set(true),
        is_premium: Set(false),
        role: Set(role.to_string()),
        password_hash: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn test_user_employee_round_trip() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let u = insert_user(&db, "employee").await?;
    let now = Utc::now().into();
    let emp = employee::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(u.id),
        tags: Set(vec!["rust".into(), "postgres".into()]),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;

    let found = employee::Entity::find()
        .filter(employee::Column::UserId.eq(u.id))
        .one(&db)
        .await?
        .expect("employee by user id");
    assert_eq!(found.id, emp.id);
    assert_eq!(found.tags, vec!["rust".to_string(), "postgres".to_string()]);

    // second profile for the same user violates the unique user_id
    let dup = employee::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(u.id),
        tags: Set(vec![]),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await;
    assert!(dup.is_err());

    user::Entity::delete_by_id(u.id).exec(&db).await?;
    assert!(employee::Entity::find_by_id(emp.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_vacancies_and_reactions_by_owner() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let eu = insert_user(&db, "employer").await?;
    let now = Utc::now();
    let er = employer::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(eu.id),
        company_name: Set("Acme".into()),
        company_description: Set(String::new()),
        company_website: Set(String::new()),
        company_location: Set("Berlin".into()),
        company_size: Set("10-50".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&db)
    .await?;

    let mut ids = Vec::new();
    for (i, title) in ["first", "second"].iter().enumerate() {
        let at = now + chrono::Duration::seconds(i as i64);
        let v = vacancy::ActiveModel {
            id: Set(Uuid::new_v4()),
            employer_id: Set(er.id),
            tags: Set(vec![]),
            title: Set(title.to_string()),
            description: Set(String::new()),
            location: Set("remote".into()),
            salary: Set("100k".into()),
            created_at: Set(at.into()),
            updated_at: Set(at.into()),
        }
        .insert(&db)
        .await?;
        ids.push(v.id);
    }

    let listed = vacancy::Entity::find()
        .filter(vacancy::Column::EmployerId.eq(er.id))
        .order_by_desc(vacancy::Column::CreatedAt)
        .all(&db)
        .await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "second");

    let cu = insert_user(&db, "employee").await?;
    let ee = employee::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(cu.id),
        tags: Set(vec![]),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&db)
    .await?;
    reaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(ee.id),
        vacancy_id: Set(ids[0]),
        kind: Set("like".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&db)
    .await?;
    let reactions = reaction::Entity::find()
        .filter(reaction::Column::EmployeeId.eq(ee.id))
        .all(&db)
        .await?;
    assert_eq!(reactions.len(), 1);

    user::Entity::delete_by_id(eu.id).exec(&db).await?;
    user::Entity::delete_by_id(cu.id).exec(&db).await?;
    Ok(())
}
