//! Compile-only tests for core API patterns.
//!
//! These tests verify that key API surfaces compile correctly.
//! They do NOT execute against a database; they only check types and signatures.

#![allow(dead_code)]

use mapsql::{
    Dialect, FieldMap, FromRow, GenericClient, MapClient, MapConfig, RowExt, SqlResult, Value,
    Where, raw,
};

struct User {
    id: i64,
    name: String,
}

impl FromRow for User {
    fn from_row(row: &tokio_postgres::Row) -> SqlResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
        })
    }
}

async fn _map_client_over_any_client<C: GenericClient>(client: C) -> SqlResult<()> {
    let db = MapClient::with_config(client, MapConfig::new().log_level(tracing::Level::INFO));
    let fields = FieldMap::new()
        .with("name", "alice")
        .with("created_at", raw("now()"));

    db.insert_map("users", &fields).await?;
    let _user: User = db.insert_map_returning("id, name", "users", &fields).await?;
    let _users: Vec<User> = db.fetch_all("select id, name from users", &[]).await?;
    let _maybe: Option<(i64,)> = db
        .fetch_opt("select id from users where name=$1", &["bob".into()])
        .await?;

    let mut w = db.new_where();
    w.and("id=%s", [1_i64]).and_list("role in (%s)", ["a", "b"]);
    db.update_map_where("users", &fields, &w).await?;
    db.update_map("users", &fields, "id=$1", &[Value::from(1_i64)])
        .await?;
    let (_id,): (i64,) = db
        .update_map_returning("id", "users", &fields, "id=$1", &[1_i64.into()])
        .await?;
    Ok(())
}

async fn _transaction_macro_compiles(client: &mut tokio_postgres::Client) -> SqlResult<i64> {
    let id = mapsql::transaction!(client, db, {
        let (id,): (i64,) = db
            .insert_map_returning("id", "users", &FieldMap::new().with("name", "x"))
            .await?;
        Ok(id)
    })?;
    Ok(id)
}

async fn _savepoint_macro_compiles(client: &mut tokio_postgres::Client) -> SqlResult<()> {
    let mut tx = client
        .transaction()
        .await
        .map_err(mapsql::SqlError::from_db_error)?;
    let _ = mapsql::savepoint!(tx, db, {
        db.execute("select 1", &[]).await?;
        Ok(())
    });
    tx.commit().await.map_err(mapsql::SqlError::from_db_error)?;
    Ok(())
}

#[cfg(feature = "pool")]
async fn _pool_compiles(pool: &deadpool_postgres::Pool) -> SqlResult<()> {
    let db = mapsql::pool::get_map_client(pool, MapConfig::default()).await?;
    db.execute("select 1", &[]).await?;

    let mut client = pool.get().await?;
    mapsql::transaction!(&mut client, MapConfig::default(), db, {
        db.execute("select 1", &[]).await?;
        Ok(())
    })?;
    Ok(())
}

#[test]
fn compile_statement_builders() {
    let fields = mapsql::field_map! {
        "name" => "alice",
        "age" => 30,
        "nickname" => None::<String>,
    };
    for dialect in Dialect::ALL {
        let st = mapsql::insert(dialect, "users", &fields);
        assert_eq!(st.args().len(), 3);
        let mut w = Where::new(dialect);
        w.and("id=%s", [1]);
        let st = mapsql::update(dialect, "users", &fields, &w.conditions(), w.args());
        assert_eq!(st.args().len(), 4);
    }
}
