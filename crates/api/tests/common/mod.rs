//! Shared fixtures for the HTTP tests: a seeded SQLite file and a live server.

#![allow(dead_code)]

use climate_api::{build_app, serve, ApiConfig};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const STATION_A: &str = "USC00519281";
pub const STATION_B: &str = "USC00519397";

pub async fn seed_database(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
         latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, \
         prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (station, name) in [
        (STATION_B, "WAIKIKI 717.2, HI US"),
        (STATION_A, "WAIHEE 837.5, HI US"),
    ] {
        sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
            .bind(station)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }

    let rows: [(&str, &str, Option<f64>, f64); 15] = [
        (STATION_A, "2016-08-20", Some(0.5), 70.0),
        (STATION_A, "2016-08-22", Some(0.1), 71.0),
        (STATION_A, "2016-08-23", Some(0.0), 72.0),
        (STATION_A, "2017-08-15", Some(0.2), 76.0),
        (STATION_A, "2017-08-16", None, 77.0),
        (STATION_A, "2017-08-17", Some(0.0), 78.0),
        (STATION_A, "2017-08-18", Some(0.3), 79.0),
        (STATION_A, "2017-08-19", Some(0.0), 80.0),
        (STATION_A, "2017-08-20", Some(0.1), 81.0),
        (STATION_A, "2017-08-21", Some(0.4), 82.0),
        (STATION_B, "2015-01-01", Some(1.0), 60.0),
        (STATION_B, "2017-08-20", Some(0.0), 84.0),
        (STATION_B, "2017-08-21", Some(0.5), 85.0),
        (STATION_B, "2017-08-22", None, 86.0),
        (STATION_B, "2017-08-23", Some(0.0), 87.0),
    ];
    for (station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
}

/// Start a server on an ephemeral port; keep the `TempDir` alive for the test
pub async fn spawn_server() -> (String, TempDir) {
    spawn_server_with(|_| {}).await
}

/// Same as [`spawn_server`], with `configure` applied to the defaults first
pub async fn spawn_server_with<F>(configure: F) -> (String, TempDir)
where
    F: FnOnce(&mut ApiConfig),
{
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hawaii.sqlite");
    seed_database(&db_path).await;

    let mut config = ApiConfig::default();
    config.database.url = db_path.to_string_lossy().into_owned();
    configure(&mut config);

    let app = build_app(&config).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(serve(listener, app, std::future::pending()));

    (format!("http://{}", addr), dir)
}

