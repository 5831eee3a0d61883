use super::*;
use crate::value::raw;
use std::sync::Mutex;
use tokio_postgres::Row;

/// Records every statement and its parameter count; never returns rows.
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<(String, usize)>>,
}

impl RecordingClient {
    fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, sql: &str, params: usize) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sql.to_string(), params));
        }
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<Vec<Row>> {
        self.record(sql, params.len());
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<u64> {
        self.record(sql, params.len());
        Ok(1)
    }
}

#[tokio::test]
async fn insert_map_executes_generated_sql() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let fields = FieldMap::new()
        .with("name", "alice")
        .with("created_at", raw("now()"))
        .with("age", 30);

    let affected = db.insert_map("users", &fields).await.unwrap();
    assert_eq!(affected, 1);
    assert_eq!(
        fake.calls(),
        vec![(
            "INSERT INTO users (age, created_at, name) VALUES ($1, now(), $2)".to_string(),
            2
        )]
    );
}

#[tokio::test]
async fn returning_without_rows_is_not_found() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let fields = FieldMap::new().with("name", "bob");

    let err = db
        .insert_map_returning::<(i64,)>("id", "users", &fields)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        fake.calls()[0].0,
        "INSERT INTO users (name) VALUES ($1) returning id"
    );
}

#[tokio::test]
async fn fetch_opt_and_fetch_all_on_empty_result() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);

    let one: Option<(i64,)> = db.fetch_opt("select 1", &[]).await.unwrap();
    assert!(one.is_none());
    let all: Vec<(i64, String)> = db
        .fetch_all("select id, name from users where id > $1", &[Value::Int(0)])
        .await
        .unwrap();
    assert!(all.is_empty());
    assert_eq!(fake.calls().len(), 2);
    assert_eq!(fake.calls()[1].1, 1);
}

#[tokio::test]
async fn update_map_numbers_set_after_where_args() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let fields = FieldMap::new().with("name", "carol").with("age", 41);

    db.update_map("users", &fields, "id=$1", &[Value::Int(7)])
        .await
        .unwrap();
    assert_eq!(
        fake.calls(),
        vec![("UPDATE users SET age=$2, name=$3 WHERE id=$1".to_string(), 3)]
    );
}

#[tokio::test]
async fn update_map_where_uses_builder() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let mut w = db.new_where();
    w.and("id=%s", [5]).and("status=%s", ["active"]);

    db.update_map_where("users", &FieldMap::new().with("age", 1), &w)
        .await
        .unwrap();
    assert_eq!(
        fake.calls(),
        vec![(
            "UPDATE users SET age=$3 WHERE id=$1 and status=$2".to_string(),
            3
        )]
    );
}

#[tokio::test]
async fn update_map_where_rejects_empty_builder() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let w = db.new_where();

    let err = db
        .update_map_where("users", &FieldMap::new().with("age", 1), &w)
        .await
        .unwrap_err();
    assert!(matches!(err, SqlError::Validation(_)));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn update_map_where_rejects_dialect_mismatch() {
    let fake = RecordingClient::default();
    let db = MapClient::new(&fake);
    let mut w = Where::new(Dialect::QuestionMark);
    w.and("id=%s", [1]);

    let err = db
        .update_map_where("users", &FieldMap::new().with("age", 1), &w)
        .await
        .unwrap_err();
    assert!(matches!(err, SqlError::Validation(_)));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn question_mark_client_generates_question_marks() {
    let fake = RecordingClient::default();
    let db = MapClient::with_config(&fake, MapConfig::new().dialect(Dialect::QuestionMark));
    let mut w = db.new_where();
    w.and("id=%s", [9]);

    db.update_map_where("users", &FieldMap::new().with("age", 2), &w)
        .await
        .unwrap();
    assert_eq!(fake.calls()[0].0, "UPDATE users SET age=? WHERE id=?");
    assert_eq!(db.dialect(), Dialect::QuestionMark);
}

#[tokio::test]
async fn logging_can_be_disabled() {
    let fake = RecordingClient::default();
    let db = MapClient::with_config(&fake, MapConfig::new().logging(false));
    assert!(!db.config().logging_enabled);
    db.execute("delete from users where id=$1", &[Value::Int(1)])
        .await
        .unwrap();
    assert_eq!(fake.calls().len(), 1);
}
