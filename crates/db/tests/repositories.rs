//! Integration tests for the repository layer against in-memory SQLite.
//!
//! Covers:
//! - City and trap CRUD, including create-or-replace semantics
//! - Trap slot uniqueness
//! - Level recolouring
//! - User upsert, update and cascade delete of sessions
//! - Session expiry
//! - Audit ordering and filtering
//! - Atomic board replacement
//! - Writes and their audit rows sharing one transaction

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use wosmap_core::roles::Role;
use wosmap_db::models::audit::{AuditQuery, CreateAuditLog};
use wosmap_db::models::city::City;
use wosmap_db::models::session::CreateSession;
use wosmap_db::models::trap::Trap;
use wosmap_db::models::user::{CreateUser, UpdateUser};
use wosmap_db::repositories::{
    AuditLogRepo, BoardRepo, CityRepo, LevelColorRepo, SessionRepo, TrapRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn pool() -> SqlitePool {
    let pool = wosmap_db::create_pool(wosmap_db::MEMORY_PATH).await.unwrap();
    wosmap_db::run_migrations(&pool).await.unwrap();
    pool
}

fn city(id: &str, name: &str, level: Option<i64>) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        level,
        status: "occupied".to_string(),
        x: 1,
        y: 2,
        px: None,
        py: None,
        notes: None,
        color: "#ec4899".to_string(),
    }
}

fn trap(id: &str, slot: i64) -> Trap {
    Trap {
        id: id.to_string(),
        slot,
        x: 0,
        y: 0,
        color: "#f59e0b".to_string(),
        notes: None,
    }
}

fn new_user(id: &str, username: &str) -> CreateUser {
    CreateUser {
        id: id.to_string(),
        username: username.to_string(),
        password_hash: "hash".to_string(),
        role: Role::Viewer,
    }
}

fn audit(entity: &str, details: &str) -> CreateAuditLog {
    CreateAuditLog::new(entity, "create", Some("x"), "tester", details.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ---------------------------------------------------------------------------
// Cities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn city_upsert_replaces_and_lists_by_name() {
    let pool = pool().await;
    CityRepo::upsert(&pool, &city("c1", "Zeta", None)).await.unwrap();
    CityRepo::upsert(&pool, &city("c2", "Alpha", None)).await.unwrap();
    CityRepo::upsert(&pool, &city("c1", "Beta", Some(2))).await.unwrap();

    let names: Vec<String> = CityRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    let found = CityRepo::find_by_id(&pool, "c1").await.unwrap().unwrap();
    assert_eq!(found.level, Some(2));
}

#[tokio::test]
async fn city_update_and_delete_report_missing_rows() {
    let pool = pool().await;
    assert!(!CityRepo::update(&pool, &city("nope", "X", None)).await.unwrap());
    assert!(!CityRepo::delete(&pool, "nope").await.unwrap());

    CityRepo::upsert(&pool, &city("c1", "X", None)).await.unwrap();
    let moved = City { x: -5, y: 7, px: Some(10.5), ..city("c1", "X", None) };
    assert!(CityRepo::update(&pool, &moved).await.unwrap());
    assert_eq!(CityRepo::find_by_id(&pool, "c1").await.unwrap(), Some(moved));
    assert!(CityRepo::delete(&pool, "c1").await.unwrap());
    assert!(CityRepo::find_by_id(&pool, "c1").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Traps
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trap_replace_displaces_the_slot_holder() {
    let pool = pool().await;
    TrapRepo::replace(&pool, &trap("t1", 1)).await.unwrap();
    TrapRepo::replace(&pool, &trap("t2", 1)).await.unwrap();

    let traps = TrapRepo::list(&pool).await.unwrap();
    assert_eq!(traps.len(), 1);
    assert_eq!(traps[0].id, "t2");
}

#[tokio::test]
async fn trap_update_into_taken_slot_is_unique_violation() {
    let pool = pool().await;
    TrapRepo::replace(&pool, &trap("t1", 1)).await.unwrap();
    TrapRepo::replace(&pool, &trap("t2", 2)).await.unwrap();

    let err = TrapRepo::update(&pool, &trap("t2", 1)).await.unwrap_err();
    assert!(is_unique_violation(&err), "unexpected error: {err}");

    let slots: Vec<i64> = TrapRepo::list(&pool).await.unwrap().iter().map(|t| t.slot).collect();
    assert_eq!(slots, vec![1, 2]);
}

#[tokio::test]
async fn trap_find_by_slot_returns_the_holder() {
    let pool = pool().await;
    TrapRepo::replace(&pool, &trap("t1", 2)).await.unwrap();

    assert_eq!(TrapRepo::find_by_slot(&pool, 2).await.unwrap().unwrap().id, "t1");
    assert!(TrapRepo::find_by_slot(&pool, 3).await.unwrap().is_none());
}

#[tokio::test]
async fn trap_slot_outside_range_is_rejected_by_schema() {
    let pool = pool().await;
    let err = TrapRepo::insert(&pool, &trap("t9", 4)).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Level colours
// ---------------------------------------------------------------------------

#[tokio::test]
async fn level_set_recolours_matching_cities_and_audits() {
    let pool = pool().await;
    CityRepo::upsert(&pool, &city("c1", "A", Some(3))).await.unwrap();
    CityRepo::upsert(&pool, &city("c2", "B", Some(4))).await.unwrap();

    let recolored = LevelColorRepo::set(&pool, 3, "#000000", &audit("level_colors", "lvl"))
        .await
        .unwrap();
    assert_eq!(recolored, 1);
    assert_eq!(
        LevelColorRepo::color_for(&pool, 3).await.unwrap().as_deref(),
        Some("#000000")
    );
    assert_eq!(CityRepo::find_by_id(&pool, "c1").await.unwrap().unwrap().color, "#000000");
    assert_eq!(CityRepo::find_by_id(&pool, "c2").await.unwrap().unwrap().color, "#ec4899");

    // New levels are inserted, not just updated.
    LevelColorRepo::set(&pool, 9, "#111", &audit("level_colors", "lvl")).await.unwrap();
    assert_eq!(LevelColorRepo::list(&pool).await.unwrap().len(), 6);

    let logs = AuditLogRepo::list(&pool, &AuditQuery::default()).await.unwrap();
    assert_eq!(logs.len(), 2);
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_upsert_update_and_unique_username() {
    let pool = pool().await;
    UserRepo::upsert(&pool, &new_user("u1", "alice")).await.unwrap();
    UserRepo::upsert(&pool, &new_user("u2", "bob")).await.unwrap();
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 2);

    let err = UserRepo::upsert(&pool, &new_user("u3", "alice")).await.unwrap_err();
    assert!(is_unique_violation(&err));

    let updated = UserRepo::update(
        &pool,
        "u1",
        &UpdateUser {
            username: "alicia".into(),
            password_hash: None,
            role: Role::Moderator,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.password_hash, "hash");
    assert_eq!(updated.role(), Role::Moderator);

    let missing = UserRepo::update(
        &pool,
        "ghost",
        &UpdateUser { username: "g".into(), password_hash: None, role: Role::Viewer },
    )
    .await
    .unwrap();
    assert!(missing.is_none());

    let names: Vec<String> = UserRepo::list(&pool).await.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(names, vec!["alicia", "bob"]);
}

#[tokio::test]
async fn sessions_resolve_until_expiry_and_cascade_on_user_delete() {
    let pool = pool().await;
    UserRepo::upsert(&pool, &new_user("u1", "alice")).await.unwrap();

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: "u1".into(),
            token_hash: "live".into(),
            expires_at: Utc::now() + Duration::days(1),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: "u1".into(),
            token_hash: "stale".into(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    let user = SessionRepo::find_active_user(&pool, "live").await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
    assert!(SessionRepo::find_active_user(&pool, "stale").await.unwrap().is_none());

    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 1);

    assert!(UserRepo::delete(&pool, "u1").await.unwrap());
    assert!(SessionRepo::find_active_user(&pool, "live").await.unwrap().is_none());
    assert!(!SessionRepo::delete_by_token_hash(&pool, "live").await.unwrap());
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn audit_lists_newest_first_with_filter_and_paging() {
    let pool = pool().await;
    AuditLogRepo::insert(&pool, &audit("cities", "first")).await.unwrap();
    AuditLogRepo::insert(&pool, &audit("traps", "second")).await.unwrap();
    AuditLogRepo::insert(&pool, &audit("cities", "third")).await.unwrap();

    let all = AuditLogRepo::list(&pool, &AuditQuery::default()).await.unwrap();
    let details: Vec<_> = all.iter().filter_map(|l| l.details.as_deref()).collect();
    assert_eq!(details, vec!["third", "second", "first"]);
    assert_eq!(all[0].actor.as_deref(), Some("tester"));

    let cities = AuditLogRepo::list(
        &pool,
        &AuditQuery { entity: Some("cities".into()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(cities.len(), 2);

    let page = AuditLogRepo::list(
        &pool,
        &AuditQuery { entity: None, limit: Some(1), offset: Some(1) },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].details.as_deref(), Some("second"));
}

// ---------------------------------------------------------------------------
// Board replacement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replace_all_swaps_board_contents() {
    let pool = pool().await;
    CityRepo::upsert(&pool, &city("old", "Old", None)).await.unwrap();
    TrapRepo::replace(&pool, &trap("t-old", 3)).await.unwrap();

    BoardRepo::replace_all(
        &pool,
        &[city("n1", "New", Some(1))],
        &[trap("t1", 1), trap("t2", 2)],
        &audit("cities", "import"),
    )
    .await
    .unwrap();

    let cities = CityRepo::list(&pool).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id, "n1");
    assert_eq!(TrapRepo::list(&pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn replace_all_is_atomic_on_failure() {
    let pool = pool().await;
    CityRepo::upsert(&pool, &city("keep", "Keep", None)).await.unwrap();

    let err = BoardRepo::replace_all(
        &pool,
        &[city("n1", "New", None)],
        &[trap("t1", 1), trap("t2", 1)],
        &audit("cities", "import"),
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));

    let cities = CityRepo::list(&pool).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id, "keep");
    assert!(AuditLogRepo::list(&pool, &AuditQuery::default()).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn uncommitted_writes_leave_no_row_and_no_audit() {
    let pool = pool().await;
    CityRepo::upsert(&pool, &city("c1", "Keep", None)).await.unwrap();
    TrapRepo::replace(&pool, &trap("t1", 1)).await.unwrap();
    UserRepo::upsert(&pool, &new_user("u1", "alice")).await.unwrap();

    {
        let mut tx = pool.begin().await.unwrap();
        CityRepo::upsert(&mut *tx, &city("c2", "New", None)).await.unwrap();
        assert!(CityRepo::update(&mut *tx, &city("c1", "Renamed", None)).await.unwrap());
        assert!(TrapRepo::delete(&mut *tx, "t1").await.unwrap());
        UserRepo::upsert(&mut *tx, &new_user("u2", "bob")).await.unwrap();
        assert!(UserRepo::delete(&mut *tx, "u1").await.unwrap());
        AuditLogRepo::insert(&mut *tx, &audit("cities", "rolled back")).await.unwrap();
    }

    let names: Vec<String> = CityRepo::list(&pool).await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Keep"]);
    assert_eq!(TrapRepo::list(&pool).await.unwrap().len(), 1);
    let users: Vec<String> = UserRepo::list(&pool).await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(users, vec!["u1"]);
    assert!(AuditLogRepo::list(&pool, &AuditQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn committed_write_and_audit_land_together() {
    let pool = pool().await;
    TrapRepo::replace(&pool, &trap("t1", 1)).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(TrapRepo::update(&mut *tx, &trap("t1", 3)).await.unwrap());
    AuditLogRepo::insert(&mut *tx, &audit("traps", "moved")).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(TrapRepo::find_by_id(&pool, "t1").await.unwrap().unwrap().slot, 3);
    let logs = AuditLogRepo::list(&pool, &AuditQuery::default()).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].details.as_deref(), Some("moved"));
}
